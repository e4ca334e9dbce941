use chrono::{DateTime, Utc};

use crate::Amount;
use crate::model::{AccountStatus, CardStatus, CustomerId, Permission};

/// A customer account as managed by the engine.
///
/// The permission flags are derived on every status transition but may be
/// toggled independently afterwards, so they are stored rather than computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub account_number: String,
    pub balance: Amount,
    pub status: AccountStatus,
    pub card_status: CardStatus,
    pub can_send_money: bool,
    pub can_login: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Change the account status and re-derive both permission flags:
    /// transfers require an active account, login anything but blocked.
    pub fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
        self.can_send_money = status == AccountStatus::Active;
        self.can_login = status != AccountStatus::Blocked;
    }

    /// Flip one permission flag, independent of status. Returns the new value.
    pub fn toggle(&mut self, permission: Permission) -> bool {
        let flag = match permission {
            Permission::SendMoney => &mut self.can_send_money,
            Permission::Login => &mut self.can_login,
        };
        *flag = !*flag;
        *flag
    }

    /// True when `query` matches the name, email, or account number.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.name.to_lowercase().contains(&lowered)
            || self.email.to_lowercase().contains(&lowered)
            || self.account_number.contains(query)
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            id: 1,
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            account_number: "2847391056".to_string(),
            balance: Amount::from_scaled(1_245_075),
            status: AccountStatus::Active,
            card_status: CardStatus::Approved,
            can_send_money: true,
            can_login: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn blocking_revokes_login_and_transfers() {
        let mut c = customer();
        c.set_status(AccountStatus::Blocked);
        assert_eq!(c.status, AccountStatus::Blocked);
        assert!(!c.can_login);
        assert!(!c.can_send_money);
    }

    #[test]
    fn freezing_revokes_transfers_only() {
        let mut c = customer();
        c.set_status(AccountStatus::Frozen);
        assert_eq!(c.status, AccountStatus::Frozen);
        assert!(!c.can_send_money);
        assert!(c.can_login);
    }

    #[test]
    fn freezing_does_not_restore_login() {
        let mut c = customer();
        c.toggle(Permission::Login);
        assert!(!c.can_login);

        // The freeze transition leaves the login flag alone either way.
        c.set_status(AccountStatus::Frozen);
        assert!(!c.can_login);
    }

    #[test]
    fn activating_restores_both_permissions() {
        let mut c = customer();
        c.set_status(AccountStatus::Blocked);
        c.set_status(AccountStatus::Active);
        assert!(c.can_login);
        assert!(c.can_send_money);
    }

    #[test]
    fn double_toggle_restores_original_value() {
        let mut c = customer();
        let before = c.can_send_money;
        c.toggle(Permission::SendMoney);
        assert_eq!(c.can_send_money, !before);
        c.toggle(Permission::SendMoney);
        assert_eq!(c.can_send_money, before);
    }

    #[test]
    fn toggle_may_desync_flags_from_status() {
        let mut c = customer();
        c.toggle(Permission::Login);
        assert_eq!(c.status, AccountStatus::Active);
        assert!(!c.can_login);
    }

    #[test]
    fn matches_name_email_and_account_number() {
        let c = customer();
        assert!(c.matches("sarah"));
        assert!(c.matches("JOHNSON"));
        assert!(c.matches("sarah.johnson@email.com"));
        assert!(c.matches("284739"));
        assert!(c.matches(""));
        assert!(!c.matches("michael"));
    }

    #[test]
    fn first_name() {
        assert_eq!(customer().first_name(), "Sarah");
    }
}
