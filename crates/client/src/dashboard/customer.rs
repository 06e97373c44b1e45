use std::sync::Arc;

use chrono::NaiveDate;

use shared_types::{
    AppError, BookingResponse, BookingStatus, CreateBookingRequest, ReviewRequest,
    ReviewResponse, ServiceResponse, UserResponse,
};

use crate::api::ResourceClient;
use crate::dashboard::{completion_ratio, matches_filter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerMetrics {
    pub total_bookings: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub completion_ratio: f64,
}

/// Customer dashboard: browse providers/services, book, review.
pub struct CustomerDashboard {
    client: Arc<ResourceClient>,
    pub customer_id: i64,
    pub providers: Vec<UserResponse>,
    pub services: Vec<ServiceResponse>,
    pub bookings: Vec<BookingResponse>,
    /// Case-insensitive substring filters applied locally.
    pub category_filter: String,
    pub location_filter: String,
}

impl CustomerDashboard {
    pub fn new(client: Arc<ResourceClient>, customer_id: i64) -> Self {
        Self {
            client,
            customer_id,
            providers: Vec::new(),
            services: Vec::new(),
            bookings: Vec::new(),
            category_filter: String::new(),
            location_filter: String::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), AppError> {
        self.providers = self.client.providers().await?;
        self.services = self.client.services().await?;
        self.bookings = self.client.bookings_by_customer(self.customer_id).await?;
        Ok(())
    }

    pub fn filtered_services(&self) -> Vec<&ServiceResponse> {
        self.services
            .iter()
            .filter(|s| {
                matches_filter(Some(&s.category), &self.category_filter)
                    && matches_filter(s.location.as_deref(), &self.location_filter)
            })
            .collect()
    }

    pub fn filtered_providers(&self) -> Vec<&UserResponse> {
        self.providers
            .iter()
            .filter(|p| {
                matches_filter(p.category.as_deref(), &self.category_filter)
                    && matches_filter(p.location.as_deref(), &self.location_filter)
            })
            .collect()
    }

    /// Book a service. The new booking lands in the local list only after
    /// the server accepts it.
    pub async fn book(
        &mut self,
        service_id: i64,
        booking_date: NaiveDate,
        time_slot: Option<String>,
        notes: Option<String>,
    ) -> Result<&BookingResponse, AppError> {
        let provider_id = self
            .services
            .iter()
            .find(|s| s.id == service_id)
            .map(|s| s.provider_id)
            .ok_or_else(|| AppError::not_found(format!("Service {service_id} not found")))?;

        let request = CreateBookingRequest {
            service_id,
            customer_id: self.customer_id,
            provider_id,
            booking_date,
            time_slot,
            notes,
        };
        let booking = self.client.create_booking(&request).await?;
        self.bookings.push(booking);
        Ok(self.bookings.last().expect("just pushed"))
    }

    pub async fn submit_review(
        &self,
        booking_id: i64,
        rating: i32,
        comment: Option<String>,
    ) -> Result<ReviewResponse, AppError> {
        let booking = self
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

        let request = ReviewRequest {
            booking_id,
            customer_id: self.customer_id,
            provider_id: booking.provider_id,
            rating,
            comment,
        };
        self.client.create_review(&request).await
    }

    pub fn metrics(&self) -> CustomerMetrics {
        let total = self.bookings.len();
        let confirmed = self.count_with_status(BookingStatus::Confirmed);
        let completed = self.count_with_status(BookingStatus::Completed);
        CustomerMetrics {
            total_bookings: total,
            confirmed,
            completed,
            completion_ratio: completion_ratio(completed, total),
        }
    }

    fn count_with_status(&self, status: BookingStatus) -> usize {
        self.bookings
            .iter()
            .filter(|b| BookingStatus::parse(&b.status) == Some(status))
            .count()
    }
}
