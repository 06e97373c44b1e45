//! Headless dashboard controllers: fetched lists, metrics, draft edit
//! state, and patch-on-success mutation flows. Rendering is someone else's
//! problem.

pub mod admin;
pub mod customer;
pub mod provider;

pub use admin::{AdminDashboard, DeleteTarget, PendingDelete};
pub use customer::{CustomerDashboard, CustomerMetrics};
pub use provider::{ProviderDashboard, ProviderMetrics, ServiceDraft};

/// `completed / total` as a ratio, 0.0 for an empty denominator. Never NaN.
pub(crate) fn completion_ratio(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}

/// Case-insensitive substring match used by the browse filters. An empty
/// needle matches everything.
pub(crate) fn matches_filter(haystack: Option<&str>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}
