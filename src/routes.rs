// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, classes, results, tests},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, tests, results, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    // Any origin: the React dev server runs on a changing localhost port.
    let cors = CorsLayer::permissive();

    let test_routes = Router::new()
        .route("/", post(tests::create_test))
        .route("/teacher/{teacher_id}", get(tests::tests_for_teacher))
        .route("/student/{student_id}", get(tests::tests_for_student))
        .route("/{test_id}", get(tests::test_detail))
        .route("/{test_id}/submit", post(tests::submit_test));

    let result_routes = Router::new()
        .route("/test/{test_id}", get(results::results_for_test))
        .route("/student/{student_id}", get(results::results_for_student))
        .route("/{result_id}/feedback", post(results::save_feedback));

    let admin_routes = Router::new()
        .route("/login", post(auth::admin_login))
        .route("/classes", get(admin::list_classes).post(admin::create_class))
        .route(
            "/teachers",
            get(admin::list_teachers).post(admin::create_teacher),
        )
        .route(
            "/students",
            get(admin::list_students).post(admin::create_student),
        )
        .route("/students/bulk", post(admin::bulk_create_students));

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/classes", get(classes::list_classes))
        .nest("/api/tests", test_routes)
        .nest("/api/results", result_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
