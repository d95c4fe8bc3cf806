pub mod client;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use client::PersistClient;
pub use error::PersistError;
pub use models::{derive_title, Message, MessageRole, NewUser, Thread, ThreadSummary, User};
pub use repositories::{ThreadRepository, UserRepository};
pub use store::{ThreadStore, UserStore};
