use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    /// Display name from the token, if the issuer provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user is an investigator
    pub fn is_investigator(&self) -> bool {
        self.has_role(crate::shared::constants::ROLE_INVESTIGATOR)
    }

    /// Check if user is an admin
    pub fn is_admin(&self) -> bool {
        self.has_role(crate::shared::constants::ROLE_ADMIN)
    }

    /// Check if user has staff-level access (admin or investigator)
    pub fn has_staff_access(&self) -> bool {
        self.is_admin() || self.is_investigator()
    }

    /// Name shown on investigator replies, falling back to the token subject
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            name: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_investigator_has_staff_access() {
        let user = user_with_roles(&["investigator"]);
        assert!(user.is_investigator());
        assert!(!user.is_admin());
        assert!(user.has_staff_access());
    }

    #[test]
    fn test_admin_has_staff_access() {
        let user = user_with_roles(&["admin"]);
        assert!(user.is_admin());
        assert!(user.has_staff_access());
    }

    #[test]
    fn test_unknown_role_has_no_access() {
        let user = user_with_roles(&["citizen"]);
        assert!(!user.has_staff_access());
    }

    #[test]
    fn test_display_name_falls_back_to_sub() {
        let mut user = user_with_roles(&["investigator"]);
        assert_eq!(user.display_name(), "user-1");

        user.name = Some("Jane Doe".to_string());
        assert_eq!(user.display_name(), "Jane Doe");
    }
}
