/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::auth::middleware::{authenticate, AuthError, CurrentUser};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health                          (public)
/// └── /users
///     ├── POST   /signup                      (public)
///     ├── POST   /login                       (public)
///     ├── POST   /create-project              (bearer)
///     ├── POST   /update-project/:project_id  (bearer)
///     ├── DELETE /delete-project/:project_id  (bearer)
///     ├── POST   /create-task                 (bearer)
///     ├── POST   /update-task/:task_id        (bearer)
///     ├── DELETE /delete-task/:task_id        (bearer)
///     ├── POST   /assign-task/:task_id        (bearer)
///     ├── GET    /get-my-tasks                (bearer)
///     └── GET    /get-my-projects             (bearer)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let public_user_routes = Router::new()
        .route("/signup", post(routes::users::signup))
        .route("/login", post(routes::users::login));

    let protected_user_routes = Router::new()
        .route("/create-project", post(routes::projects::create_project))
        .route(
            "/update-project/:project_id",
            post(routes::projects::update_project),
        )
        .route(
            "/delete-project/:project_id",
            delete(routes::projects::delete_project),
        )
        .route("/get-my-projects", get(routes::projects::get_my_projects))
        .route("/create-task", post(routes::tasks::create_task))
        .route("/update-task/:task_id", post(routes::tasks::update_task))
        .route("/delete-task/:task_id", delete(routes::tasks::delete_task))
        .route("/assign-task/:task_id", post(routes::tasks::assign_task))
        .route("/get-my-tasks", get(routes::tasks::get_my_tasks))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_user,
        ));

    let user_routes = public_user_routes.merge(protected_user_routes);

    Router::new()
        .merge(health_routes)
        .nest("/users", user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config.api.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Bearer authentication layer
///
/// Resolves the token to an active user and inserts [`CurrentUser`] into the
/// request extensions. Every failure is a 401 with the same message.
async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let user = match authenticate(&state.db, state.jwt_secret(), auth_header.as_deref()).await {
        Ok(user) => user,
        Err(AuthError::DatabaseError(msg)) => {
            tracing::warn!(error = %msg, "User lookup failed during authentication");
            return Err(AuthError::DatabaseError(msg).into());
        }
        Err(err) => return Err(err.into()),
    };

    req.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(req).await)
}
