pub mod driver;
pub mod reveal;

pub use driver::{spawn_reveal, RevealEvent, RevealHandle, DEFAULT_REVEAL_INTERVAL};
pub use reveal::{PacerState, RevealPacer};
