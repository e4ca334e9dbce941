//! Core domain types for the account state engine.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::Amount;

/// Customer identifier.
pub type CustomerId = u32;

/// Card request identifier.
pub type RequestId = u32;

/// Transaction identifier.
pub type TxId = u32;

/// Administrator identifier.
pub type AdminId = u16;

/// An intent representing the possible inputs of the engine.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Block a customer; revokes both login and outgoing transfers.
    Block { customer: CustomerId },
    /// Freeze a customer's account; revokes outgoing transfers only.
    Freeze { customer: CustomerId },
    /// Return a customer to active; restores both permissions.
    Unblock { customer: CustomerId },
    /// Flip a customer's outgoing-transfer permission.
    ToggleSendMoney { customer: CustomerId },
    /// Flip a customer's login permission.
    ToggleLogin { customer: CustomerId },
    /// Approve a pending card request.
    ApproveCard { request: RequestId },
    /// Reject a pending card request.
    RejectCard { request: RequestId },
    /// Move funds from one customer to another.
    Send {
        sender: CustomerId,
        recipient: CustomerId,
        amount: Amount,
        note: Option<String>,
    },
}

/// Lifecycle status of a customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountStatus {
    #[default]
    Active,
    /// Login and outgoing transfers revoked.
    Blocked,
    /// Outgoing transfers revoked; login untouched.
    Frozen,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccountStatus::Active => "active",
            AccountStatus::Blocked => "blocked",
            AccountStatus::Frozen => "frozen",
        })
    }
}

/// Card issuance stage shown on a customer record, independent of account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    None,
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardStatus::None => "none",
            CardStatus::Pending => "pending",
            CardStatus::Approved => "approved",
            CardStatus::Rejected => "rejected",
        })
    }
}

/// State of a card request. Pending requests move to a terminal state
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// The kind of card a customer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Debit,
    Credit,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardType::Debit => "debit",
            CardType::Credit => "credit",
        })
    }
}

/// An administrator's verdict on a pending card request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

impl From<Decision> for CardStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => CardStatus::Approved,
            Decision::Rejected => CardStatus::Rejected,
        }
    }
}

/// Direction of a recorded money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// A permission flag togglable independently of account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    SendMoney,
    Login,
}

/// Action tag recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    BlockCustomer,
    UnblockCustomer,
    FreezeAccount,
    UpdatePermission,
    ApproveCard,
    RejectCard,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuditAction::BlockCustomer => "BLOCK_CUSTOMER",
            AuditAction::UnblockCustomer => "UNBLOCK_CUSTOMER",
            AuditAction::FreezeAccount => "FREEZE_ACCOUNT",
            AuditAction::UpdatePermission => "UPDATE_PERMISSION",
            AuditAction::ApproveCard => "APPROVE_CARD",
            AuditAction::RejectCard => "REJECT_CARD",
        })
    }
}

/// Immutable record of a money movement on a customer's account.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TxId,
    pub customer: CustomerId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub description: String,
    /// Display name of the other party.
    pub counterparty: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// True when the description or counterparty contains `query`
    /// (case-insensitive). An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.description.to_lowercase().contains(&query)
            || self.counterparty.to_lowercase().contains(&query)
    }
}

/// A customer's ask for a new card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRequest {
    pub id: RequestId,
    pub customer: CustomerId,
    pub customer_name: String,
    pub card_type: CardType,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl CardRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// One entry of the admin accountability trail.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: u32,
    pub admin: AdminId,
    pub action: AuditAction,
    pub target: Option<CustomerId>,
    pub target_name: Option<String>,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// Message surfaced to a customer in their notification feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub customer: CustomerId,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
