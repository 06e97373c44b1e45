use std::sync::Arc;

use shared_types::{
    AppError, BookingResponse, BookingStatus, ServiceRequest, ServiceResponse,
};

use crate::api::{patch_by_id, remove_by_id, ResourceClient};
use crate::dashboard::completion_ratio;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderMetrics {
    pub service_count: usize,
    pub total_bookings: usize,
    pub completed_bookings: usize,
    pub completion_ratio: f64,
}

/// A service being edited in place. The draft is a full copy; saving sends
/// the whole thing, cancelling throws it away.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub id: i64,
    pub request: ServiceRequest,
}

/// Provider dashboard: own listings, incoming bookings, status workflow.
pub struct ProviderDashboard {
    client: Arc<ResourceClient>,
    pub provider_id: i64,
    pub services: Vec<ServiceResponse>,
    pub bookings: Vec<BookingResponse>,
    pub draft: Option<ServiceDraft>,
}

impl ProviderDashboard {
    pub fn new(client: Arc<ResourceClient>, provider_id: i64) -> Self {
        Self {
            client,
            provider_id,
            services: Vec::new(),
            bookings: Vec::new(),
            draft: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), AppError> {
        self.services = self.client.services_by_provider(self.provider_id).await?;
        self.bookings = self.client.bookings_by_provider(self.provider_id).await?;
        Ok(())
    }

    /// Clone a listing into the draft slot. Replaces any previous draft.
    pub fn begin_edit(&mut self, service_id: i64) -> Result<&mut ServiceDraft, AppError> {
        let service = self
            .services
            .iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| AppError::not_found(format!("Service {service_id} not found")))?;

        self.draft = Some(ServiceDraft {
            id: service.id,
            request: ServiceRequest {
                provider_id: service.provider_id,
                category: service.category.clone(),
                subcategory: service.subcategory.clone(),
                description: service.description.clone(),
                price: service.price,
                availability: service.availability.clone(),
                location: service.location.clone(),
            },
        });
        Ok(self.draft.as_mut().expect("just set"))
    }

    /// Discard the draft. No network call.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Send the full draft; on success the listing is replaced
    /// field-for-field and the draft cleared. On failure both the list and
    /// the draft stay as they are.
    pub async fn save_draft(&mut self) -> Result<(), AppError> {
        let draft = self
            .draft
            .clone()
            .ok_or_else(|| AppError::bad_request("No draft to save"))?;

        let updated = self.client.update_service(draft.id, &draft.request).await?;
        patch_by_id(&mut self.services, updated, |s| s.id);
        self.draft = None;
        Ok(())
    }

    pub async fn create_service(&mut self, request: &ServiceRequest) -> Result<(), AppError> {
        let created = self.client.create_service(request).await?;
        self.services.push(created);
        Ok(())
    }

    pub async fn delete_service(&mut self, service_id: i64) -> Result<(), AppError> {
        self.client.delete_service(service_id).await?;
        remove_by_id(&mut self.services, service_id, |s| s.id);
        Ok(())
    }

    /// Request a status transition; the server has the final say and the
    /// local list takes whatever comes back.
    pub async fn set_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<(), AppError> {
        let updated = self.client.update_booking_status(booking_id, status).await?;
        patch_by_id(&mut self.bookings, updated, |b| b.id);
        Ok(())
    }

    pub fn metrics(&self) -> ProviderMetrics {
        let total = self.bookings.len();
        let completed = self
            .bookings
            .iter()
            .filter(|b| BookingStatus::parse(&b.status) == Some(BookingStatus::Completed))
            .count();
        ProviderMetrics {
            service_count: self.services.len(),
            total_bookings: total,
            completed_bookings: completed,
            completion_ratio: completion_ratio(completed, total),
        }
    }
}
