use serde::{Deserialize, Serialize};

/// Login request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Registration request. Provider registrations carry the initial
/// service-offering fields; when `category` is set the server also creates
/// an initial service listing for the new provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct RegisterRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
    /// One of CUSTOMER / PROVIDER / ADMIN (case-insensitive).
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    // Provider-only fields.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub service_area: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub availability: Option<String>,
}

/// Login response: bearer token plus the canonical role string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthResponse {
    pub token: String,
    pub role: String,
}

/// Registration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_defaults_provider_fields() {
        let json = r#"{
            "name": "Ana",
            "email": "ana@example.com",
            "password": "hunter2hunter2",
            "role": "CUSTOMER"
        }"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert!(req.category.is_none());
        assert!(req.price.is_none());
    }

    #[test]
    fn auth_response_roundtrip() {
        let resp = AuthResponse {
            token: "eyJ...".into(),
            role: "ADMIN".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: AuthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp, parsed);
    }
}
