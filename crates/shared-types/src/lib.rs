//! Shared domain types for the FixItNow services marketplace.
//!
//! The same structs serve the axum server (`server` feature adds sqlx row
//! derives and the `IntoResponse` impl for [`AppError`]) and the client
//! crate (no default features).

pub mod admin_log;
pub mod auth;
pub mod booking;
pub mod error;
pub mod models;
pub mod report;
pub mod review;
pub mod service;
pub mod user;

pub use admin_log::{AdminLog, AdminLogResponse, CreateAdminLogRequest};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse};
pub use booking::{
    Booking, BookingResponse, CreateBookingRequest, UpdateBookingRequest,
    UpdateBookingStatusRequest,
};
pub use error::{AppError, AppErrorKind};
pub use models::{BookingStatus, ReportTargetType, Role};
pub use report::{
    CreateReportRequest, Report, ReportCountResponse, ReportResponse, UpdateReportRequest,
};
pub use review::{AverageRatingResponse, Review, ReviewRequest, ReviewResponse};
pub use service::{Service, ServiceRequest, ServiceResponse};
pub use user::{ProviderProfile, UpdateUserRequest, User, UserResponse};
