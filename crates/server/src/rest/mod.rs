pub mod admin_log;
pub mod auth;
pub mod booking;
pub mod report;
pub mod review;
pub mod service;
pub mod user;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::db::AppState;

/// Build the combined REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Users
        .route("/api/users/all", get(user::list_users))
        .route("/api/users/me", get(user::current_user))
        .route("/api/users/providers", get(user::list_providers))
        .route("/api/users/id/{id}", get(user::get_user))
        .route("/api/users/email/{email}", get(user::get_user_by_email))
        .route("/api/users/{id}", put(user::update_user).delete(user::delete_user))
        // Services
        .route("/api/services", get(service::list_services).post(service::create_service))
        .route("/api/services/provider/{provider_id}", get(service::list_by_provider))
        .route(
            "/api/services/{id}",
            get(service::get_service)
                .put(service::update_service)
                .delete(service::delete_service),
        )
        // Bookings
        .route("/api/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/api/bookings/customer/{customer_id}", get(booking::list_by_customer))
        .route("/api/bookings/provider/{provider_id}", get(booking::list_by_provider))
        .route("/api/bookings/service/{service_id}", get(booking::list_by_service))
        .route("/api/bookings/status/{status}", get(booking::list_by_status))
        .route(
            "/api/bookings/{id}",
            get(booking::get_booking)
                .put(booking::update_booking)
                .delete(booking::delete_booking),
        )
        .route("/api/bookings/{id}/status", patch(booking::update_booking_status))
        // Reviews
        .route("/api/reviews", get(review::list_reviews).post(review::create_review))
        .route("/api/reviews/provider/{provider_id}", get(review::list_by_provider))
        .route(
            "/api/reviews/provider/{provider_id}/average-rating",
            get(review::average_rating),
        )
        .route("/api/reviews/customer/{customer_id}", get(review::list_by_customer))
        .route("/api/reviews/booking/{booking_id}", get(review::list_by_booking))
        .route(
            "/api/reviews/{id}",
            get(review::get_review)
                .put(review::update_review)
                .delete(review::delete_review),
        )
        // Reports
        .route("/api/reports", get(report::list_reports).post(report::create_report))
        .route("/api/reports/my-reports", get(report::my_reports))
        .route("/api/reports/reporter/{reporter_id}", get(report::list_by_reporter))
        .route(
            "/api/reports/target/{target_type}/{target_id}",
            get(report::list_by_target),
        )
        .route("/api/reports/target-type/{target_type}", get(report::list_by_target_type))
        .route(
            "/api/reports/count/target/{target_type}/{target_id}",
            get(report::count_for_target),
        )
        .route(
            "/api/reports/{id}",
            get(report::get_report)
                .put(report::update_report)
                .delete(report::delete_report),
        )
        // Admin audit log
        .route("/api/admin-logs", get(admin_log::list_logs).post(admin_log::create_log))
        .route("/api/admin-logs/recent", get(admin_log::list_recent))
        .route("/api/admin-logs/admin/{admin_id}", get(admin_log::list_by_admin))
        .route(
            "/api/admin-logs/{id}",
            get(admin_log::get_log).delete(admin_log::delete_log),
        )
}

/// REST router with the bearer-token middleware applied.
pub fn api_router_with_auth() -> Router<AppState> {
    api_router().layer(axum::middleware::from_fn(
        crate::auth::middleware::auth_middleware,
    ))
}
