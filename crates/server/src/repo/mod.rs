pub mod admin_log;
pub mod booking;
pub mod report;
pub mod review;
pub mod service;
pub mod user;
