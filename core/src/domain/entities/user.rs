//! User entity representing a registered account.
//!
//! The token engine treats users as read-only: they are created by the
//! registration flow and mutated only by profile and role-management flows
//! outside this core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user, embedded as the `role` claim in issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Default role assigned at registration
    Customer,
    /// Tenant manager
    Manager,
    /// Platform administrator
    Admin,
}

impl UserRole {
    /// Stable string form used in token claims and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }

    /// Parses the storage/claim string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(UserRole::Customer),
            "manager" => Some(UserRole::Manager),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address, unique per user, stored normalized
    pub email: String,

    /// bcrypt hash of the user's password; never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role assigned to the user
    pub role: UserRole,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the default customer role
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash,
            role: UserRole::Customer,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_customer_role() {
        let user = User::new(
            "Ansar".to_string(),
            "Shaikh".to_string(),
            "ansar@gmail.com".to_string(),
            "$2b$10$hash".to_string(),
        );

        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.email, "ansar@gmail.com");
    }

    #[test]
    fn role_round_trips_through_string_form() {
        for role in [UserRole::Customer, UserRole::Manager, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User::new(
            "Ansar".to_string(),
            "Shaikh".to_string(),
            "ansar@gmail.com".to_string(),
            "$2b$10$hash".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
