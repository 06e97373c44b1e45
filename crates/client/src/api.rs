use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use shared_types::{
    AdminLogResponse, AppError, AuthResponse, AverageRatingResponse, BookingResponse,
    BookingStatus, CreateAdminLogRequest, CreateBookingRequest, CreateReportRequest, LoginRequest,
    RegisterRequest, RegisterResponse, ReportCountResponse, ReportResponse, ReportTargetType,
    ReviewRequest, ReviewResponse, ServiceRequest, ServiceResponse, UpdateBookingRequest,
    UpdateBookingStatusRequest, UpdateReportRequest, UpdateUserRequest, UserResponse,
};

use crate::transport::{ApiRequest, ApiResponse, ApiTransport, Method};

type AuthErrorHook = Arc<dyn Fn() + Send + Sync>;

/// Typed wrapper over the REST API. Injects the bearer token on every call
/// except `/api/auth/*`, maps HTTP failures onto [`AppError`], and fires the
/// registered hook when the server answers 401/403 so the session store can
/// tear the session down.
pub struct ResourceClient {
    transport: Arc<dyn ApiTransport>,
    token: Mutex<Option<String>>,
    on_auth_error: Mutex<Option<AuthErrorHook>>,
}

impl ResourceClient {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            token: Mutex::new(None),
            on_auth_error: Mutex::new(None),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().expect("token lock poisoned") = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().expect("token lock poisoned").clone()
    }

    /// Register the session-teardown hook. Replaces any previous hook.
    pub fn set_on_auth_error(&self, hook: AuthErrorHook) {
        *self.on_auth_error.lock().expect("hook lock poisoned") = Some(hook);
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, AppError> {
        // Auth endpoints are the only unauthenticated calls.
        let bearer = if path.starts_with("/api/auth/") {
            None
        } else {
            self.token()
        };
        let authed = bearer.is_some();

        let response = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
                bearer,
            })
            .await?;

        if response.is_success() {
            serde_json::from_value(response.body)
                .map_err(|e| AppError::internal(format!("Malformed response body: {e}")))
        } else {
            let err = decode_error(response);
            if err.is_auth_error() && authed {
                self.set_token(None);
                let hook = self.on_auth_error.lock().expect("hook lock poisoned").clone();
                if let Some(hook) = hook {
                    hook();
                }
            }
            Err(err)
        }
    }

    fn to_body<B: serde::Serialize>(body: &B) -> Result<Value, AppError> {
        serde_json::to_value(body).map_err(|e| AppError::internal(e.to_string()))
    }

    // -- Auth ---------------------------------------------------------------

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.request(Method::Post, "/api/auth/login", Some(Self::to_body(req)?))
            .await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, AppError> {
        self.request(Method::Post, "/api/auth/register", Some(Self::to_body(req)?))
            .await
    }

    // -- Users --------------------------------------------------------------

    pub async fn current_user(&self) -> Result<UserResponse, AppError> {
        self.request(Method::Get, "/api/users/me", None).await
    }

    pub async fn all_users(&self) -> Result<Vec<UserResponse>, AppError> {
        self.request(Method::Get, "/api/users/all", None).await
    }

    pub async fn providers(&self) -> Result<Vec<UserResponse>, AppError> {
        self.request(Method::Get, "/api/users/providers", None).await
    }

    pub async fn user_by_id(&self, id: i64) -> Result<UserResponse, AppError> {
        self.request(Method::Get, &format!("/api/users/id/{id}"), None)
            .await
    }

    pub async fn user_by_email(&self, email: &str) -> Result<UserResponse, AppError> {
        let encoded = urlencoding::encode(email);
        self.request(Method::Get, &format!("/api/users/email/{encoded}"), None)
            .await
    }

    pub async fn update_user(
        &self,
        id: i64,
        req: &UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        self.request(
            Method::Put,
            &format!("/api/users/{id}"),
            Some(Self::to_body(req)?),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        self.request(Method::Delete, &format!("/api/users/{id}"), None)
            .await
    }

    // -- Services -----------------------------------------------------------

    pub async fn services(&self) -> Result<Vec<ServiceResponse>, AppError> {
        self.request(Method::Get, "/api/services", None).await
    }

    pub async fn services_by_provider(
        &self,
        provider_id: i64,
    ) -> Result<Vec<ServiceResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/services/provider/{provider_id}"),
            None,
        )
        .await
    }

    pub async fn service(&self, id: i64) -> Result<ServiceResponse, AppError> {
        self.request(Method::Get, &format!("/api/services/{id}"), None)
            .await
    }

    pub async fn create_service(&self, req: &ServiceRequest) -> Result<ServiceResponse, AppError> {
        self.request(Method::Post, "/api/services", Some(Self::to_body(req)?))
            .await
    }

    pub async fn update_service(
        &self,
        id: i64,
        req: &ServiceRequest,
    ) -> Result<ServiceResponse, AppError> {
        self.request(
            Method::Put,
            &format!("/api/services/{id}"),
            Some(Self::to_body(req)?),
        )
        .await
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), AppError> {
        self.request(Method::Delete, &format!("/api/services/{id}"), None)
            .await
    }

    // -- Bookings -----------------------------------------------------------

    pub async fn create_booking(
        &self,
        req: &CreateBookingRequest,
    ) -> Result<BookingResponse, AppError> {
        self.request(Method::Post, "/api/bookings", Some(Self::to_body(req)?))
            .await
    }

    pub async fn bookings(&self) -> Result<Vec<BookingResponse>, AppError> {
        self.request(Method::Get, "/api/bookings", None).await
    }

    pub async fn bookings_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<BookingResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/bookings/customer/{customer_id}"),
            None,
        )
        .await
    }

    pub async fn bookings_by_provider(
        &self,
        provider_id: i64,
    ) -> Result<Vec<BookingResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/bookings/provider/{provider_id}"),
            None,
        )
        .await
    }

    pub async fn bookings_by_service(
        &self,
        service_id: i64,
    ) -> Result<Vec<BookingResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/bookings/service/{service_id}"),
            None,
        )
        .await
    }

    pub async fn bookings_by_status(
        &self,
        status: BookingStatus,
    ) -> Result<Vec<BookingResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/bookings/status/{}", status.as_str()),
            None,
        )
        .await
    }

    pub async fn booking(&self, id: i64) -> Result<BookingResponse, AppError> {
        self.request(Method::Get, &format!("/api/bookings/{id}"), None)
            .await
    }

    pub async fn update_booking(
        &self,
        id: i64,
        req: &UpdateBookingRequest,
    ) -> Result<BookingResponse, AppError> {
        self.request(
            Method::Put,
            &format!("/api/bookings/{id}"),
            Some(Self::to_body(req)?),
        )
        .await
    }

    pub async fn update_booking_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<BookingResponse, AppError> {
        let req = UpdateBookingStatusRequest {
            status: status.as_str().to_string(),
        };
        self.request(
            Method::Patch,
            &format!("/api/bookings/{id}/status"),
            Some(Self::to_body(&req)?),
        )
        .await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<(), AppError> {
        self.request(Method::Delete, &format!("/api/bookings/{id}"), None)
            .await
    }

    // -- Reviews ------------------------------------------------------------

    pub async fn create_review(&self, req: &ReviewRequest) -> Result<ReviewResponse, AppError> {
        self.request(Method::Post, "/api/reviews", Some(Self::to_body(req)?))
            .await
    }

    pub async fn reviews(&self) -> Result<Vec<ReviewResponse>, AppError> {
        self.request(Method::Get, "/api/reviews", None).await
    }

    pub async fn reviews_by_provider(
        &self,
        provider_id: i64,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reviews/provider/{provider_id}"),
            None,
        )
        .await
    }

    pub async fn average_rating(
        &self,
        provider_id: i64,
    ) -> Result<AverageRatingResponse, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reviews/provider/{provider_id}/average-rating"),
            None,
        )
        .await
    }

    pub async fn reviews_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reviews/customer/{customer_id}"),
            None,
        )
        .await
    }

    pub async fn reviews_by_booking(
        &self,
        booking_id: i64,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reviews/booking/{booking_id}"),
            None,
        )
        .await
    }

    pub async fn review(&self, id: i64) -> Result<ReviewResponse, AppError> {
        self.request(Method::Get, &format!("/api/reviews/{id}"), None)
            .await
    }

    pub async fn update_review(
        &self,
        id: i64,
        req: &ReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        self.request(
            Method::Put,
            &format!("/api/reviews/{id}"),
            Some(Self::to_body(req)?),
        )
        .await
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), AppError> {
        self.request(Method::Delete, &format!("/api/reviews/{id}"), None)
            .await
    }

    // -- Reports ------------------------------------------------------------

    pub async fn create_report(
        &self,
        req: &CreateReportRequest,
    ) -> Result<ReportResponse, AppError> {
        self.request(Method::Post, "/api/reports", Some(Self::to_body(req)?))
            .await
    }

    pub async fn reports(&self) -> Result<Vec<ReportResponse>, AppError> {
        self.request(Method::Get, "/api/reports", None).await
    }

    pub async fn my_reports(&self) -> Result<Vec<ReportResponse>, AppError> {
        self.request(Method::Get, "/api/reports/my-reports", None)
            .await
    }

    pub async fn reports_by_reporter(
        &self,
        reporter_id: i64,
    ) -> Result<Vec<ReportResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reports/reporter/{reporter_id}"),
            None,
        )
        .await
    }

    pub async fn reports_by_target(
        &self,
        target_type: ReportTargetType,
        target_id: i64,
    ) -> Result<Vec<ReportResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reports/target/{}/{target_id}", target_type.as_str()),
            None,
        )
        .await
    }

    pub async fn reports_by_target_type(
        &self,
        target_type: ReportTargetType,
    ) -> Result<Vec<ReportResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/reports/target-type/{}", target_type.as_str()),
            None,
        )
        .await
    }

    pub async fn report_count_for_target(
        &self,
        target_type: ReportTargetType,
        target_id: i64,
    ) -> Result<ReportCountResponse, AppError> {
        self.request(
            Method::Get,
            &format!(
                "/api/reports/count/target/{}/{target_id}",
                target_type.as_str()
            ),
            None,
        )
        .await
    }

    pub async fn report(&self, id: i64) -> Result<ReportResponse, AppError> {
        self.request(Method::Get, &format!("/api/reports/{id}"), None)
            .await
    }

    pub async fn update_report(
        &self,
        id: i64,
        req: &UpdateReportRequest,
    ) -> Result<ReportResponse, AppError> {
        self.request(
            Method::Put,
            &format!("/api/reports/{id}"),
            Some(Self::to_body(req)?),
        )
        .await
    }

    pub async fn delete_report(&self, id: i64) -> Result<(), AppError> {
        self.request(Method::Delete, &format!("/api/reports/{id}"), None)
            .await
    }

    // -- Admin audit log ----------------------------------------------------

    pub async fn create_admin_log(
        &self,
        req: &CreateAdminLogRequest,
    ) -> Result<AdminLogResponse, AppError> {
        self.request(Method::Post, "/api/admin-logs", Some(Self::to_body(req)?))
            .await
    }

    pub async fn admin_logs(&self) -> Result<Vec<AdminLogResponse>, AppError> {
        self.request(Method::Get, "/api/admin-logs", None).await
    }

    pub async fn recent_admin_logs(&self, limit: u32) -> Result<Vec<AdminLogResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/admin-logs/recent?limit={limit}"),
            None,
        )
        .await
    }

    pub async fn admin_logs_by_admin(
        &self,
        admin_id: i64,
    ) -> Result<Vec<AdminLogResponse>, AppError> {
        self.request(
            Method::Get,
            &format!("/api/admin-logs/admin/{admin_id}"),
            None,
        )
        .await
    }

    pub async fn admin_log(&self, id: i64) -> Result<AdminLogResponse, AppError> {
        self.request(Method::Get, &format!("/api/admin-logs/{id}"), None)
            .await
    }

    pub async fn delete_admin_log(&self, id: i64) -> Result<(), AppError> {
        self.request(Method::Delete, &format!("/api/admin-logs/{id}"), None)
            .await
    }
}

/// Decode an error response body into an [`AppError`]. Falls back to
/// classifying by status when the body is not the structured error shape.
fn decode_error(response: ApiResponse) -> AppError {
    if let Ok(err) = serde_json::from_value::<AppError>(response.body.clone()) {
        return err;
    }
    let message = response
        .body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Request failed")
        .to_string();
    AppError::from_status(response.status, message)
}

// ---------------------------------------------------------------------------
// Patch-on-success list helpers
// ---------------------------------------------------------------------------

/// Replace the element with the matching id by `updated`. No-op when the id
/// is absent.
pub fn patch_by_id<T, F>(list: &mut Vec<T>, updated: T, id_of: F)
where
    F: Fn(&T) -> i64,
{
    let id = id_of(&updated);
    if let Some(slot) = list.iter_mut().find(|item| id_of(item) == id) {
        *slot = updated;
    }
}

/// Remove the element with the given id. No-op when the id is absent.
pub fn remove_by_id<T, F>(list: &mut Vec<T>, id: i64, id_of: F)
where
    F: Fn(&T) -> i64,
{
    list.retain(|item| id_of(item) != id);
}
