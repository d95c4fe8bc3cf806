use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use nivonix_api::{
    config::Config,
    docs::ApiDoc,
    middleware::logging,
    routes::{auth, chat, health},
    state::AppState,
};
use nivonix_auth::{AuthService, FederatedVerifier, GoogleVerifier, TokenSigner};
use nivonix_chat::ConversationService;
use nivonix_llm::{GeminiClient, ReplyGenerator};
use nivonix_persist::{PersistClient, ThreadStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Nivonix API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize persistence and make sure the unique indexes exist before
    // the first request can race on them.
    tracing::info!("Connecting to MongoDB");
    let persist = PersistClient::new(&config.mongodb_uri, &config.mongodb.database).await?;
    persist.ensure_indexes().await?;
    tracing::info!("MongoDB connected");

    // Initialize the reply generator
    let generation_timeout = Duration::from_secs(config.llm.request_timeout_secs);
    let generator: Arc<dyn ReplyGenerator> = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.llm.model.clone(),
        generation_timeout,
    )?);

    // Identity gate
    let verifier: Arc<dyn FederatedVerifier> =
        Arc::new(GoogleVerifier::new(config.auth.google_client_id.clone())?);
    let users: Arc<dyn UserStore> = Arc::new(persist.users().clone());
    let auth = Arc::new(AuthService::new(
        users,
        TokenSigner::new(&config.jwt_secret),
        verifier,
    ));

    // Conversation service
    let store: Arc<dyn ThreadStore> = Arc::new(persist.threads().clone());
    let chat_service = Arc::new(
        ConversationService::new(store.clone(), generator)
            .with_generation_timeout(generation_timeout),
    );

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), auth, chat_service, store));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/verify", post(auth::verify))
        .route("/google", post(auth::google));

    let chat_routes = Router::new()
        .route("/", post(chat::send_message))
        .route("/thread", get(chat::list_threads))
        .route("/thread/:thread_id", get(chat::get_thread))
        .route("/thread/:thread_id", delete(chat::delete_thread));

    Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/chat", chat_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
