use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{AppError, Role};

use super::jwt::Claims;

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extractor that requires authentication AND an exact role.
/// Returns 401 if unauthenticated, 403 if the role does not match.
///
/// Role constants (match `Role` variants):
/// - 1 = Customer
/// - 2 = Provider
/// - 3 = Admin
pub struct RoleRequired<const ROLE: u8>(pub Claims);

impl<const ROLE: u8, S: Send + Sync> FromRequestParts<S> for RoleRequired<ROLE> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let required = match ROLE {
            1 => Role::Customer,
            2 => Role::Provider,
            _ => Role::Admin,
        };

        if Role::parse(&claims.role) != Some(required) {
            return Err(AppError::forbidden(format!(
                "{} role required",
                required.as_str()
            )));
        }

        Ok(RoleRequired(claims))
    }
}

pub type CustomerRequired = RoleRequired<1>;
pub type ProviderRequired = RoleRequired<2>;
pub type AdminRequired = RoleRequired<3>;

/// Check that the caller holds one of the listed roles. Used by handlers
/// that accept several roles with per-role ownership rules.
pub fn require_any(claims: &Claims, allowed: &[Role]) -> Result<Role, AppError> {
    let role = Role::parse(&claims.role)
        .ok_or_else(|| AppError::forbidden("Unrecognized role"))?;
    if allowed.contains(&role) {
        Ok(role)
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}

/// Admins may touch any user record; everyone else only their own.
pub fn require_self_or_admin(claims: &Claims, user_id: i64) -> Result<(), AppError> {
    if Role::parse(&claims.role) == Some(Role::Admin) || claims.sub == user_id {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(id: i64, role: &str) -> Claims {
        Claims {
            sub: id,
            email: "x@example.com".into(),
            role: role.into(),
            exp: 0,
            iat: 0,
            jti: None,
        }
    }

    #[test]
    fn require_any_accepts_listed_roles() {
        let c = claims(1, "CUSTOMER");
        assert_eq!(
            require_any(&c, &[Role::Customer, Role::Admin]).unwrap(),
            Role::Customer
        );
    }

    #[test]
    fn require_any_rejects_unlisted_and_unknown_roles() {
        let c = claims(1, "PROVIDER");
        assert!(require_any(&c, &[Role::Customer, Role::Admin]).is_err());
        let c = claims(1, "superuser");
        assert!(require_any(&c, &[Role::Customer]).is_err());
    }

    #[test]
    fn require_any_normalizes_role_casing() {
        let c = claims(1, "provider");
        assert_eq!(require_any(&c, &[Role::Provider]).unwrap(), Role::Provider);
    }

    #[test]
    fn self_or_admin_rules() {
        assert!(require_self_or_admin(&claims(5, "CUSTOMER"), 5).is_ok());
        assert!(require_self_or_admin(&claims(5, "CUSTOMER"), 6).is_err());
        assert!(require_self_or_admin(&claims(1, "ADMIN"), 6).is_ok());
    }
}
