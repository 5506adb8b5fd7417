use serde::{Deserialize, Serialize};

/// Role of the signed-in account, as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Supplier,
    Admin,
    Temporary,
    Buyer,
    /// Any role this client does not know; grants nothing
    #[serde(other)]
    Unknown,
}

/// Things a page may need permission for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewOwnDispatches,
    ReviewDispatchRequests,
    BrowseInventory,
    ViewFinancialAnalytics,
    ManageTemporaryUsers,
    WithdrawProducts,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::ViewOwnDispatches,
        Capability::ReviewDispatchRequests,
        Capability::BrowseInventory,
        Capability::ViewFinancialAnalytics,
        Capability::ManageTemporaryUsers,
        Capability::WithdrawProducts,
    ];
}

impl UserRole {
    /// The one place role gating is decided. Pages and the sidebar call this
    /// instead of matching on roles themselves.
    pub fn can(&self, capability: Capability) -> bool {
        use Capability::*;
        use UserRole::*;
        match (self, capability) {
            (Supplier, ViewOwnDispatches | BrowseInventory | ManageTemporaryUsers) => true,
            (Admin, ReviewDispatchRequests | BrowseInventory | ViewFinancialAnalytics) => true,
            (Temporary | Buyer, WithdrawProducts) => true,
            _ => false,
        }
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.can(*c))
            .collect()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Supplier => "Supplier",
            UserRole::Admin => "Administrator",
            UserRole::Temporary => "Temporary user",
            UserRole::Buyer => "Buyer",
            UserRole::Unknown => "Unknown",
        }
    }
}

/// Capability check for an optional role (no session means no access).
pub fn role_can(role: Option<UserRole>, capability: Capability) -> bool {
    role.is_some_and(|r| r.can(capability))
}

/// True when the role holds at least one of `any_of`.
pub fn role_can_any(role: Option<UserRole>, any_of: &[Capability]) -> bool {
    any_of.iter().any(|c| role_can(role, *c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        assert!(UserRole::Supplier.can(Capability::ViewOwnDispatches));
        assert!(UserRole::Supplier.can(Capability::ManageTemporaryUsers));
        assert!(!UserRole::Supplier.can(Capability::ReviewDispatchRequests));
        assert!(!UserRole::Supplier.can(Capability::ViewFinancialAnalytics));

        assert!(UserRole::Admin.can(Capability::ReviewDispatchRequests));
        assert!(UserRole::Admin.can(Capability::ViewFinancialAnalytics));
        assert!(UserRole::Admin.can(Capability::BrowseInventory));
        assert!(!UserRole::Admin.can(Capability::ManageTemporaryUsers));

        assert_eq!(UserRole::Temporary.capabilities(), vec![Capability::WithdrawProducts]);
        assert_eq!(UserRole::Buyer.capabilities(), vec![Capability::WithdrawProducts]);
    }

    #[test]
    fn test_unknown_role_has_no_capabilities() {
        let role: UserRole = serde_json::from_str("\"AUDITOR\"").unwrap();
        assert_eq!(role, UserRole::Unknown);
        assert!(role.capabilities().is_empty());
        assert!(!role_can(None, Capability::BrowseInventory));
    }

    #[test]
    fn test_role_can_any() {
        let own = [Capability::ViewOwnDispatches, Capability::WithdrawProducts];
        assert!(role_can_any(Some(UserRole::Supplier), &own));
        assert!(role_can_any(Some(UserRole::Buyer), &own));
        assert!(role_can_any(Some(UserRole::Temporary), &own));
        assert!(!role_can_any(Some(UserRole::Admin), &own));
        assert!(!role_can_any(None, &own));
        assert!(!role_can_any(Some(UserRole::Supplier), &[]));
    }

    #[test]
    fn test_role_wire_format() {
        let role: UserRole = serde_json::from_str("\"TEMPORARY\"").unwrap();
        assert_eq!(role, UserRole::Temporary);
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
    }
}
