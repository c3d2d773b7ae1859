use std::sync::Arc;

use axum::{
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpConfig;
use crate::middleware::jwt::jwt_middleware;
use crate::routes::{auth, clubs, health, matches, participants, tournaments, users};
use crate::state::AppState;

/// Assemble the full REST surface with its middleware stack.
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(auth_routes(http))
        .route("/api/auth/validate", get(auth::validate))
        .route("/api/clubs", get(clubs::list).post(clubs::create))
        .route(
            "/api/clubs/{id}",
            get(clubs::get).put(clubs::update).delete(clubs::delete),
        )
        .route(
            "/api/participants",
            get(participants::list).post(participants::create),
        )
        .route("/api/participants/search", get(participants::search))
        .route(
            "/api/participants/club/{club_id}",
            get(participants::by_club),
        )
        .route(
            "/api/participants/{id}",
            get(participants::get)
                .put(participants::update)
                .delete(participants::delete),
        )
        .route(
            "/api/tournaments",
            get(tournaments::list).post(tournaments::create),
        )
        .route("/api/tournaments/date/{date}", get(tournaments::by_date))
        .route("/api/tournaments/date-range", get(tournaments::by_date_range))
        .route(
            "/api/tournaments/{id}",
            get(tournaments::get)
                .put(tournaments::update)
                .delete(tournaments::delete),
        )
        .route("/api/matches", get(matches::list).post(matches::create))
        .route(
            "/api/matches/tournament/{tournament_id}",
            get(matches::by_tournament),
        )
        .route(
            "/api/matches/tournament/{tournament_id}/round/{round}",
            get(matches::by_tournament_and_round),
        )
        .route(
            "/api/matches/tournament/{tournament_id}/mat/{mat_number}",
            get(matches::by_tournament_and_mat),
        )
        .route(
            "/api/matches/participant/{participant_id}",
            get(matches::by_participant),
        )
        .route(
            "/api/matches/{id}",
            get(matches::get).put(matches::update).delete(matches::delete),
        )
        .route("/api/users", get(users::list))
        .route(
            "/api/users/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, jwt_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            http.request_timeout,
        ))
        .layer(cors_layer(&http.allowed_origins))
}

/// Login and register, rate limited per client IP when enabled.
fn auth_routes(http: &HttpConfig) -> Router<AppState> {
    let routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register));

    if !http.auth_rate_limit {
        return routes;
    }

    // 1 token every 6 seconds with a burst of 10, about 10 attempts per minute
    match GovernorConfigBuilder::default()
        .per_second(6)
        .burst_size(10)
        .finish()
    {
        Some(conf) => routes.layer(GovernorLayer::new(Arc::new(conf))),
        None => {
            tracing::warn!("Invalid rate limit configuration; auth routes are not rate limited");
            routes
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}
