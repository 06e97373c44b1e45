#[cfg(test)]
mod common;

#[cfg(test)]
mod session_login_tests;

#[cfg(test)]
mod session_restore_tests;

#[cfg(test)]
mod session_register_tests;

#[cfg(test)]
mod session_teardown_tests;

#[cfg(test)]
mod route_guard_tests;

#[cfg(test)]
mod customer_dashboard_tests;

#[cfg(test)]
mod provider_dashboard_tests;

#[cfg(test)]
mod admin_dashboard_tests;

#[cfg(test)]
mod report_tests;
