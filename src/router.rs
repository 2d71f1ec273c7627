use crate::docs::ApiDoc;
use crate::middleware::role::{require_admin, require_educator, require_identity};
use crate::modules::applications::{
    init_admin_applications_router, init_educator_applications_router,
};
use crate::modules::assessments::{init_course_tests_router, init_tests_router};
use crate::modules::auth::{init_auth_router, init_session_router};
use crate::modules::courses::{
    init_admin_courses_router, init_educator_courses_router, init_public_courses_router,
};
use crate::modules::purchases::{init_checkout_router, init_payments_router};
use crate::modules::users::{init_admin_users_router, init_users_router};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Router, middleware};
use learnhub_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn init_api_router(state: &AppState) -> Router<AppState> {
    let identity = || middleware::from_fn_with_state(state.clone(), require_identity);
    let educator = || middleware::from_fn_with_state(state.clone(), require_educator);
    let admin = || middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .nest(
            "/auth",
            init_auth_router().merge(init_session_router().route_layer(identity())),
        )
        .nest("/users", init_users_router().route_layer(identity()))
        .nest(
            "/courses",
            init_public_courses_router().merge(
                init_checkout_router()
                    .merge(init_course_tests_router())
                    .route_layer(identity()),
            ),
        )
        .nest("/payments", init_payments_router().route_layer(identity()))
        .nest("/tests", init_tests_router().route_layer(identity()))
        .nest(
            "/educator",
            init_educator_applications_router()
                .route_layer(identity())
                .merge(init_educator_courses_router().route_layer(educator())),
        )
        .nest(
            "/admin",
            Router::new()
                .nest("/users", init_admin_users_router())
                .nest("/educator-applications", init_admin_applications_router())
                .nest("/courses", init_admin_courses_router())
                .route_layer(admin()),
        )
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/metrics", get(render_metrics))
        .nest("/api", init_api_router(&state))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
