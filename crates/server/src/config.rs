use std::net::SocketAddr;

/// Server settings resolved from environment variables. A `.env` file is
/// honored in development; production sets the variables directly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("FIXITNOW_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let host = std::env::var("FIXITNOW_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let bind_addr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)));
        Self { bind_addr }
    }
}
