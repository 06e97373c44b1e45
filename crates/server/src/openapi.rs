use axum::Json;
use shared_types::{
    AdminLogResponse, AppError, AppErrorKind, AuthResponse, AverageRatingResponse,
    BookingResponse, BookingStatus, CreateAdminLogRequest, CreateBookingRequest,
    CreateReportRequest, LoginRequest, RegisterRequest, RegisterResponse, ReportCountResponse,
    ReportResponse, ReportTargetType, ReviewRequest, ReviewResponse, Role, ServiceRequest,
    ServiceResponse, UpdateBookingRequest, UpdateBookingStatusRequest, UpdateReportRequest,
    UpdateUserRequest, UserResponse,
};
use utoipa::OpenApi;

use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        // Auth
        rest::auth::register,
        rest::auth::login,
        // Users
        rest::user::list_users,
        rest::user::current_user,
        rest::user::list_providers,
        rest::user::get_user,
        rest::user::get_user_by_email,
        rest::user::update_user,
        rest::user::delete_user,
        // Services
        rest::service::list_services,
        rest::service::list_by_provider,
        rest::service::get_service,
        rest::service::create_service,
        rest::service::update_service,
        rest::service::delete_service,
        // Bookings
        rest::booking::create_booking,
        rest::booking::list_bookings,
        rest::booking::list_by_customer,
        rest::booking::list_by_provider,
        rest::booking::list_by_service,
        rest::booking::list_by_status,
        rest::booking::get_booking,
        rest::booking::update_booking,
        rest::booking::update_booking_status,
        rest::booking::delete_booking,
        // Reviews
        rest::review::create_review,
        rest::review::list_reviews,
        rest::review::list_by_provider,
        rest::review::average_rating,
        rest::review::list_by_customer,
        rest::review::list_by_booking,
        rest::review::get_review,
        rest::review::update_review,
        rest::review::delete_review,
        // Reports
        rest::report::create_report,
        rest::report::list_reports,
        rest::report::my_reports,
        rest::report::list_by_reporter,
        rest::report::list_by_target,
        rest::report::list_by_target_type,
        rest::report::count_for_target,
        rest::report::get_report,
        rest::report::update_report,
        rest::report::delete_report,
        // Admin audit log
        rest::admin_log::create_log,
        rest::admin_log::list_logs,
        rest::admin_log::list_recent,
        rest::admin_log::list_by_admin,
        rest::admin_log::get_log,
        rest::admin_log::delete_log,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        Role,
        BookingStatus,
        ReportTargetType,
        LoginRequest,
        RegisterRequest,
        AuthResponse,
        RegisterResponse,
        UserResponse,
        UpdateUserRequest,
        ServiceRequest,
        ServiceResponse,
        CreateBookingRequest,
        UpdateBookingRequest,
        UpdateBookingStatusRequest,
        BookingResponse,
        ReviewRequest,
        ReviewResponse,
        AverageRatingResponse,
        CreateReportRequest,
        UpdateReportRequest,
        ReportResponse,
        ReportCountResponse,
        CreateAdminLogRequest,
        AdminLogResponse,
        health::HealthReport,
        health::DatabaseHealth,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User accounts and provider profiles"),
        (name = "services", description = "Provider service listings"),
        (name = "bookings", description = "Service bookings"),
        (name = "reviews", description = "Booking reviews and provider ratings"),
        (name = "reports", description = "User-submitted reports"),
        (name = "admin-logs", description = "Admin audit log"),
        (name = "health", description = "Liveness and readiness"),
    ),
    info(
        title = "FixItNow API",
        description = "Local-services marketplace REST API",
    )
)]
pub struct ApiDoc;

/// Serve the generated document. Mounted at `/api-docs/openapi.json`.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_serializes_and_covers_core_paths() {
        let spec = ApiDoc::openapi().to_json().unwrap();
        assert!(spec.contains("/api/auth/login"));
        assert!(spec.contains("/api/bookings/{id}/status"));
        assert!(spec.contains("/api/reviews/provider/{provider_id}/average-rating"));
        assert!(spec.contains("/api/reports/count/target/{target_type}/{target_id}"));
    }

    #[tokio::test]
    async fn document_route_serves_the_full_path_set() {
        let Json(doc) = openapi_json().await;
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/api/reports/my-reports"));
        assert!(!doc.paths.paths.is_empty());
    }
}
