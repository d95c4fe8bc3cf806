use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use nivonix_auth::{AuthError, AuthSession};
use nivonix_persist::User;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = SessionResponse),
        (status = 400, description = "Missing fields or email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    let session = state
        .auth
        .register(req.name.trim(), req.email.trim(), &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(session_response("User registered successfully", session)),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let session = state.auth.login(req.email.trim(), &req.password).await?;

    Ok(Json(session_response("Login successful", session)))
}

/// Check a session token
///
/// Answers the validity question rather than failing: a bad token yields
/// 200 with `valid: false`.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 400, description = "Token missing")
    ),
    tag = "auth"
)]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenRequest>,
) -> ApiResult<Json<VerifyResponse>> {
    if req.token.is_empty() {
        return Err(ApiError::BadRequest("Token is required".to_string()));
    }

    match state.auth.verify(&req.token).await {
        Ok(user) => Ok(Json(VerifyResponse {
            valid: true,
            user: Some(user_response(&user)),
        })),
        Err(AuthError::Unauthenticated) => Ok(Json(VerifyResponse {
            valid: false,
            user: None,
        })),
        Err(e) => Err(e.into()),
    }
}

/// Sign in with a Google ID token
#[utoipa::path(
    post,
    path = "/api/auth/google",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Google login successful", body = SessionResponse),
        (status = 401, description = "Token rejected by the issuer")
    ),
    tag = "auth"
)]
pub async fn google(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenRequest>,
) -> ApiResult<Json<SessionResponse>> {
    if req.token.is_empty() {
        return Err(ApiError::BadRequest("Token is required".to_string()));
    }

    let session = state.auth.federated_sign_in(&req.token).await?;

    Ok(Json(session_response("Google login successful", session)))
}

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_hex(),
        name: user.name.clone(),
        email: user.email.clone(),
        picture: user.picture.clone(),
    }
}

fn session_response(message: &str, session: AuthSession) -> SessionResponse {
    SessionResponse {
        message: message.to_string(),
        token: session.token,
        user: user_response(&session.user),
    }
}
