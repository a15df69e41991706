pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Company accounts
        .route("/login", post(auth::handle_login))
        .route("/sign-up", post(auth::handle_sign_up))
        .route("/reset-password", post(auth::handle_reset_password))
        // Jobs
        .route(
            "/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_replace_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Applications
        .route("/apply", post(applications::handle_apply))
        .route("/applications", get(applications::handle_list_applications))
        .route(
            "/user-applications",
            get(applications::handle_user_applications),
        )
        .route(
            "/company-applications",
            get(applications::handle_company_applications),
        )
        .route(
            "/update-application-status",
            patch(applications::handle_update_status),
        )
        // Resumes
        .route("/upload-resume", post(resumes::handle_upload_resume))
        .route("/user-resume", get(resumes::handle_get_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
