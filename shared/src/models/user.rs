//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An application user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Fixed application roles. Each maps to a permission set at token-issue
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Cashier,
    Agent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Cashier => "cashier",
            UserRole::Agent => "agent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "manager" => Some(UserRole::Manager),
            "cashier" => Some(UserRole::Cashier),
            "agent" => Some(UserRole::Agent),
            _ => None,
        }
    }

    /// `resource:action` permissions granted to the role
    pub fn permissions(&self) -> Vec<String> {
        let perms: &[&str] = match self {
            UserRole::Admin => &[
                "users:manage",
                "warehouses:manage",
                "suppliers:manage",
                "products:manage",
                "inventory:read",
                "sales:create",
                "sales:read",
                "procurements:manage",
                "collections:create",
                "collections:read",
                "transfers:create",
                "transfers:read",
            ],
            UserRole::Manager => &[
                "warehouses:manage",
                "suppliers:manage",
                "products:manage",
                "inventory:read",
                "sales:read",
                "procurements:manage",
                "collections:read",
                "transfers:create",
                "transfers:read",
            ],
            UserRole::Cashier => &["inventory:read", "sales:create", "sales:read"],
            UserRole::Agent => &["collections:create", "collections:read"],
        };
        perms.iter().map(|p| p.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_strings() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::Cashier, UserRole::Agent] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn cashiers_cannot_manage_procurements() {
        let perms = UserRole::Cashier.permissions();
        assert!(perms.contains(&"sales:create".to_string()));
        assert!(!perms.iter().any(|p| p.starts_with("procurements:")));
    }
}
