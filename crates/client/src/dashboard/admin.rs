use std::sync::Arc;

use shared_types::{AdminLogResponse, AppError, ReportResponse, ServiceResponse, UserResponse};

use crate::api::{remove_by_id, ResourceClient};

const RECENT_LOG_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    User,
    Service,
}

/// A delete waiting for explicit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelete {
    pub target: DeleteTarget,
    pub id: i64,
}

/// Admin dashboard: every user, every listing, the report queue and the
/// audit log. Deletes are two-step: request, then confirm.
pub struct AdminDashboard {
    client: Arc<ResourceClient>,
    pub users: Vec<UserResponse>,
    pub services: Vec<ServiceResponse>,
    pub reports: Vec<ReportResponse>,
    pub logs: Vec<AdminLogResponse>,
    pub pending_delete: Option<PendingDelete>,
}

impl AdminDashboard {
    pub fn new(client: Arc<ResourceClient>) -> Self {
        Self {
            client,
            users: Vec::new(),
            services: Vec::new(),
            reports: Vec::new(),
            logs: Vec::new(),
            pending_delete: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), AppError> {
        self.users = self.client.all_users().await?;
        self.services = self.client.services().await?;
        self.reports = self.client.reports().await?;
        self.logs = self.client.recent_admin_logs(RECENT_LOG_LIMIT).await?;
        Ok(())
    }

    /// Stage a delete. Nothing goes over the wire until
    /// [`Self::confirm_delete`].
    pub fn request_delete(&mut self, target: DeleteTarget, id: i64) {
        self.pending_delete = Some(PendingDelete { target, id });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Execute the staged delete. On success the row disappears from the
    /// local list; on failure the list is untouched and the confirmation
    /// stays staged so the admin can retry or cancel.
    pub async fn confirm_delete(&mut self) -> Result<(), AppError> {
        let pending = self
            .pending_delete
            .ok_or_else(|| AppError::bad_request("No delete pending confirmation"))?;

        match pending.target {
            DeleteTarget::User => {
                self.client.delete_user(pending.id).await?;
                remove_by_id(&mut self.users, pending.id, |u| u.id);
            }
            DeleteTarget::Service => {
                self.client.delete_service(pending.id).await?;
                remove_by_id(&mut self.services, pending.id, |s| s.id);
            }
        }

        self.pending_delete = None;
        Ok(())
    }

    /// Dismiss a filed report. Single-step: a report is moderation state,
    /// not user data, so it skips the confirmation staging.
    pub async fn dismiss_report(&mut self, id: i64) -> Result<(), AppError> {
        self.client.delete_report(id).await?;
        remove_by_id(&mut self.reports, id, |r| r.id);
        Ok(())
    }

    pub async fn refresh_logs(&mut self) -> Result<(), AppError> {
        self.logs = self.client.recent_admin_logs(RECENT_LOG_LIMIT).await?;
        Ok(())
    }
}
