use utoipa::OpenApi;

use crate::routes::{auth, chat, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::verify,
        auth::google,
        chat::send_message,
        chat::list_threads,
        chat::get_thread,
        chat::delete_thread,
    ),
    components(schemas(
        health::HealthResponse,
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::TokenRequest,
        auth::UserResponse,
        auth::SessionResponse,
        auth::VerifyResponse,
        chat::TurnRequest,
        chat::TurnResponse,
        chat::ThreadSummaryResponse,
        chat::MessageResponse,
        chat::DeleteResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration, login and federated sign-in"),
        (name = "chat", description = "Conversation threads")
    )
)]
pub struct ApiDoc;
