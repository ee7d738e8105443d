//! Router assembly and the shared application state.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenService;
use crate::config::ApiConfig;
use crate::database::repositories::{
    ExerciseRepository, PgExerciseRepository, PgUserRepository, PgWorkoutExerciseRepository,
    PgWorkoutRepository, UserRepository, WorkoutExerciseRepository, WorkoutRepository,
};
use crate::database::{DatabaseManager, StoreHealth};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Everything a handler needs, built once at start-up and shared by reference
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
    pub workout_exercises: Arc<dyn WorkoutExerciseRepository>,
    pub health: Arc<dyn StoreHealth>,
    pub tokens: TokenService,
}

impl AppState {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(database: DatabaseManager, tokens: TokenService) -> Self {
        let pool = database.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            workouts: Arc::new(PgWorkoutRepository::new(pool.clone())),
            exercises: Arc::new(PgExerciseRepository::new(pool.clone())),
            workout_exercises: Arc::new(PgWorkoutExerciseRepository::new(pool)),
            health: Arc::new(database),
            tokens,
        }
    }
}

pub fn app(state: AppState, config: &ApiConfig) -> Router {
    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.max_request_size_bytes))
        .layer(cors_layer());

    let router = if config.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::health::root))
        .route("/health", get(public::health::health))
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{auth, exercises, workout_exercises, workouts};

    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/workouts/:id",
            get(workouts::show)
                .put(workouts::update)
                .delete(workouts::delete),
        )
        .route(
            "/workouts/:id/exercises",
            get(workout_exercises::list).post(workout_exercises::create),
        )
        .route(
            "/workouts/:id/exercises/:exercise_id",
            get(workout_exercises::show)
                .put(workout_exercises::update)
                .delete(workout_exercises::delete),
        )
        .route("/exercises", get(exercises::list).post(exercises::create))
        .route(
            "/exercises/:id",
            get(exercises::show)
                .put(exercises::update)
                .delete(exercises::delete),
        )
        // Only matched routes are authenticated; unknown paths still 404
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
