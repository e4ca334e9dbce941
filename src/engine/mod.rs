//! Account state engine.
//!
//! The engine owns the customer, card-request, transaction, audit, and
//! notification collections and applies admin- and customer-triggered
//! intents to them: status changes, permission toggles, card decisions,
//! and transfers. Also supports an async stream of intents.

use std::collections::HashMap;

use chrono::Utc;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::model::{
    AccountStatus, AdminId, AuditAction, AuditEntry, CardRequest, CardType, CustomerId, Decision,
    Intent, Notification, Permission, RequestId, Transaction, TransactionKind,
};

mod state;
pub use state::Customer;

mod error;
pub use error::{
    AccountAction, AccountError, CardError, EngineError, LoginError, TransferError,
};

/// Initial collections used to preload an engine.
#[derive(Debug, Default)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub card_requests: Vec<CardRequest>,
    pub transactions: Vec<Transaction>,
    pub audit_log: Vec<AuditEntry>,
    pub notifications: Vec<Notification>,
}

/// Successful result of [`Engine::apply`]: the updated entity snapshot plus
/// a confirmation message for display.
#[derive(Debug, Clone)]
pub enum Outcome {
    Status { customer: Customer, message: String },
    Permission { customer: Customer, message: String },
    Card { request: CardRequest, message: String },
    Transfer(TransferReceipt),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Status { message, .. }
            | Outcome::Permission { message, .. }
            | Outcome::Card { message, .. } => message,
            Outcome::Transfer(receipt) => &receipt.message,
        }
    }
}

/// Confirmation returned for a successful transfer.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub reference: String,
    pub sender: CustomerId,
    pub recipient: CustomerId,
    pub amount: Amount,
    pub message: String,
}

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub active_customers: usize,
    pub blocked_customers: usize,
    pub pending_requests: usize,
    pub total_balance: Amount,
}

/// The account state engine.
///
/// Maintains customer accounts, card requests, transaction history, the
/// audit trail, and customer notifications.
pub struct Engine {
    admin: AdminId,
    customers: HashMap<CustomerId, Customer>,
    requests: HashMap<RequestId, CardRequest>,
    transactions: Vec<Transaction>,
    audit: Vec<AuditEntry>,
    notifications: Vec<Notification>,
    next_tx: u32,
    next_audit: u32,
    next_notification: u32,
    next_reference: u32,
}

/// Public API
impl Engine {
    /// Create an empty engine acting on behalf of the given administrator.
    pub fn new(admin: AdminId) -> Self {
        Self {
            admin,
            customers: HashMap::new(),
            requests: HashMap::new(),
            transactions: Vec::new(),
            audit: Vec::new(),
            notifications: Vec::new(),
            next_tx: 1,
            next_audit: 1,
            next_notification: 1,
            next_reference: 10_000_001,
        }
    }

    /// Build an engine preloaded with the given dataset. Id counters resume
    /// after the highest seeded ids.
    pub fn load(admin: AdminId, dataset: Dataset) -> Self {
        let mut engine = Self::new(admin);
        engine.next_tx = next_id(dataset.transactions.iter().map(|t| t.id));
        engine.next_audit = next_id(dataset.audit_log.iter().map(|e| e.id));
        engine.next_notification = next_id(dataset.notifications.iter().map(|n| n.id));
        engine.customers = dataset.customers.into_iter().map(|c| (c.id, c)).collect();
        engine.requests = dataset
            .card_requests
            .into_iter()
            .map(|r| (r.id, r))
            .collect();
        engine.transactions = dataset.transactions;
        engine.audit = dataset.audit_log;
        engine.notifications = dataset.notifications;
        engine
    }

    /// Run the engine with the given intent stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Intent> + Unpin) {
        while let Some(intent) = stream.next().await {
            // any error should not stop the engine, so we just ignore the application result
            let _ = self.apply(intent);
        }
    }

    /// Apply a single intent on top of the current engine state
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome, EngineError> {
        match intent {
            Intent::Block { customer } => {
                let result =
                    self.apply_status(customer, AccountStatus::Blocked, AccountAction::Block);
                Self::log_result("block", customer, &result);
                Ok(result?)
            }
            Intent::Freeze { customer } => {
                let result =
                    self.apply_status(customer, AccountStatus::Frozen, AccountAction::Freeze);
                Self::log_result("freeze", customer, &result);
                Ok(result?)
            }
            Intent::Unblock { customer } => {
                let result =
                    self.apply_status(customer, AccountStatus::Active, AccountAction::Unblock);
                Self::log_result("unblock", customer, &result);
                Ok(result?)
            }
            Intent::ToggleSendMoney { customer } => {
                let result = self.apply_toggle(
                    customer,
                    Permission::SendMoney,
                    AccountAction::ToggleSendMoney,
                );
                Self::log_result("toggle_send_money", customer, &result);
                Ok(result?)
            }
            Intent::ToggleLogin { customer } => {
                let result =
                    self.apply_toggle(customer, Permission::Login, AccountAction::ToggleLogin);
                Self::log_result("toggle_login", customer, &result);
                Ok(result?)
            }
            Intent::ApproveCard { request } => {
                let result = self.apply_card(request, Decision::Approved);
                Self::log_result("approve_card", request, &result);
                Ok(result?)
            }
            Intent::RejectCard { request } => {
                let result = self.apply_card(request, Decision::Rejected);
                Self::log_result("reject_card", request, &result);
                Ok(result?)
            }
            Intent::Send {
                sender,
                recipient,
                amount,
                note,
            } => {
                let result = self.apply_send(sender, recipient, amount, note.as_deref());
                Self::log_result("send", sender, &result);
                Ok(result?)
            }
        }
    }

    /// Validate a customer login attempt.
    ///
    /// There is no credential store; any non-empty password is accepted for
    /// a known identifier, but customers with login revoked are turned away.
    pub fn login(&self, identifier: &str, password: &str) -> Result<&Customer, LoginError> {
        if identifier.trim().is_empty() || password.is_empty() {
            return Err(LoginError::EmptyCredentials);
        }

        let customer = self
            .find_by_identifier(identifier)
            .ok_or(LoginError::UnknownCustomer)?;

        if !customer.can_login {
            return Err(LoginError::LoginDisabled(customer.id));
        }

        Ok(customer)
    }

    /// Look a customer up by email, phone, or account number.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<&Customer> {
        let identifier = identifier.trim();
        self.customers.values().find(|c| {
            c.email.eq_ignore_ascii_case(identifier)
                || c.phone == identifier
                || c.account_number == identifier
        })
    }

    /// Return the state of all customer accounts.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.customers.values()
    }

    /// Return the state of one customer account
    pub fn get_customer(&self, customer: CustomerId) -> Option<&Customer> {
        self.customers.get(&customer)
    }

    /// Customers matching a text query and an optional status filter.
    pub fn search_customers<'a>(
        &'a self,
        query: &'a str,
        status: Option<AccountStatus>,
    ) -> impl Iterator<Item = &'a Customer> + 'a {
        self.customers
            .values()
            .filter(move |c| c.matches(query) && status.is_none_or(|s| c.status == s))
    }

    pub fn card_requests(&self) -> impl Iterator<Item = &CardRequest> + '_ {
        self.requests.values()
    }

    pub fn get_request(&self, request: RequestId) -> Option<&CardRequest> {
        self.requests.get(&request)
    }

    /// Requests still awaiting a decision.
    pub fn pending_requests(&self) -> impl Iterator<Item = &CardRequest> + '_ {
        self.requests.values().filter(|r| r.is_pending())
    }

    /// Requests that already received a decision.
    pub fn processed_requests(&self) -> impl Iterator<Item = &CardRequest> + '_ {
        self.requests.values().filter(|r| !r.is_pending())
    }

    /// Full transaction history, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// One customer's transactions, filtered by a text query and an optional
    /// transaction kind.
    pub fn transaction_history<'a>(
        &'a self,
        customer: CustomerId,
        query: &'a str,
        kind: Option<TransactionKind>,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |t| {
            t.customer == customer && t.matches(query) && kind.is_none_or(|k| t.kind == k)
        })
    }

    /// Admin accountability trail, oldest first.
    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit
    }

    pub fn notifications_for(&self, customer: CustomerId) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications.iter().filter(move |n| n.customer == customer)
    }

    pub fn unread_notifications(&self, customer: CustomerId) -> usize {
        self.notifications_for(customer).filter(|n| !n.read).count()
    }

    /// Aggregate dashboard figures.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            active_customers: 0,
            blocked_customers: 0,
            pending_requests: self.pending_requests().count(),
            total_balance: Amount::ZERO,
        };
        for customer in self.customers.values() {
            match customer.status {
                AccountStatus::Active => stats.active_customers += 1,
                AccountStatus::Blocked => stats.blocked_customers += 1,
                AccountStatus::Frozen => {}
            }
            stats.total_balance += customer.balance;
        }
        stats
    }
}

/// Private API
impl Engine {
    /// Small helper to log `apply` results
    fn log_result<E: std::fmt::Display>(op: &str, subject: u32, result: &Result<Outcome, E>) {
        match result {
            Ok(outcome) => {
                info!(
                    subject = %subject,
                    message = %outcome.message(),
                    "{op} applied"
                );
            }
            Err(e) => {
                info!(
                    subject = %subject,
                    reason = %e,
                    "{op} skipped"
                );
            }
        }
    }

    /// Apply a status-changing intent:
    /// - Find the customer
    /// - Set the status and re-derive both permission flags
    /// - Append an audit entry
    fn apply_status(
        &mut self,
        customer: CustomerId,
        status: AccountStatus,
        action: AccountAction,
    ) -> Result<Outcome, AccountError> {
        let record = self
            .customers
            .get_mut(&customer)
            .ok_or(AccountError::CustomerNotFound(action, customer))?;

        record.set_status(status);
        let snapshot = record.clone();

        let message = match status {
            AccountStatus::Active => "Customer account activated",
            AccountStatus::Blocked => "Customer blocked - Cannot login or send money",
            AccountStatus::Frozen => "Account frozen - Temporary restriction applied",
        }
        .to_string();

        let audit_action = match status {
            AccountStatus::Active => AuditAction::UnblockCustomer,
            AccountStatus::Blocked => AuditAction::BlockCustomer,
            AccountStatus::Frozen => AuditAction::FreezeAccount,
        };
        self.record_audit(
            audit_action,
            Some((snapshot.id, snapshot.name.as_str())),
            message.clone(),
        );

        Ok(Outcome::Status {
            customer: snapshot,
            message,
        })
    }

    /// Apply a permission toggle, independent of account status. Toggles may
    /// leave the flags inconsistent with the status-derived values; that is
    /// permitted.
    fn apply_toggle(
        &mut self,
        customer: CustomerId,
        permission: Permission,
        action: AccountAction,
    ) -> Result<Outcome, AccountError> {
        let record = self
            .customers
            .get_mut(&customer)
            .ok_or(AccountError::CustomerNotFound(action, customer))?;

        let enabled = record.toggle(permission);
        let snapshot = record.clone();

        let message = match permission {
            Permission::SendMoney => "Transfer permission updated",
            Permission::Login => "Login permission updated",
        }
        .to_string();

        let details = match (permission, enabled) {
            (Permission::SendMoney, true) => "Outgoing transfers enabled",
            (Permission::SendMoney, false) => "Outgoing transfers disabled",
            (Permission::Login, true) => "Login access enabled",
            (Permission::Login, false) => "Login access disabled",
        };
        self.record_audit(
            AuditAction::UpdatePermission,
            Some((snapshot.id, snapshot.name.as_str())),
            details.to_string(),
        );

        Ok(Outcome::Permission {
            customer: snapshot,
            message,
        })
    }

    /// Apply a card decision:
    /// - Find the request; a request may be decided exactly once
    /// - Set the terminal status and the processing timestamp
    /// - Mirror the decision onto the owning customer's card status
    /// - Append an audit entry and notify the customer
    fn apply_card(&mut self, request: RequestId, decision: Decision) -> Result<Outcome, CardError> {
        let record = self
            .requests
            .get_mut(&request)
            .ok_or(CardError::RequestNotFound(request))?;

        if !record.is_pending() {
            return Err(CardError::AlreadyProcessed(request));
        }

        record.status = decision.into();
        record.processed_at = Some(Utc::now());
        let snapshot = record.clone();

        if let Some(customer) = self.customers.get_mut(&snapshot.customer) {
            customer.card_status = decision.into();
        }

        let verb = match decision {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        };
        let message = format!("Card request {verb} for {}", snapshot.customer_name);

        let card = match snapshot.card_type {
            CardType::Debit => "Debit",
            CardType::Credit => "Credit",
        };
        let audit_action = match decision {
            Decision::Approved => AuditAction::ApproveCard,
            Decision::Rejected => AuditAction::RejectCard,
        };
        self.record_audit(
            audit_action,
            Some((snapshot.customer, snapshot.customer_name.as_str())),
            format!("{card} card request {verb}"),
        );

        let title = match decision {
            Decision::Approved => "Card Approved",
            Decision::Rejected => "Card Rejected",
        };
        let body = match decision {
            Decision::Approved => {
                format!("Your {} card request has been approved!", snapshot.card_type)
            }
            Decision::Rejected => {
                format!("Your {} card request has been rejected", snapshot.card_type)
            }
        };
        self.notify(snapshot.customer, title, body);

        Ok(Outcome::Card {
            request: snapshot,
            message,
        })
    }

    /// Apply a transfer:
    /// - Validate the amount, both parties, the sender's transfer
    ///   permission, and the sender's balance
    /// - Move the funds and record a debit/credit pair sharing one reference
    /// - Notify the recipient
    fn apply_send(
        &mut self,
        sender: CustomerId,
        recipient: CustomerId,
        amount: Amount,
        note: Option<&str>,
    ) -> Result<Outcome, TransferError> {
        if !amount.is_positive() {
            return Err(TransferError::InvalidAmount(amount));
        }

        let from = self
            .customers
            .get(&sender)
            .ok_or(TransferError::SenderNotFound(sender))?;

        if !from.can_send_money {
            return Err(TransferError::SendingDisabled(sender));
        }

        let sender_name = from.name.clone();
        let sender_first = from.first_name().to_string();
        let available = from.balance;

        let to = self
            .customers
            .get(&recipient)
            .ok_or(TransferError::RecipientNotFound(recipient))?;
        let recipient_name = to.name.clone();
        let recipient_first = to.first_name().to_string();

        if available < amount {
            return Err(TransferError::InsufficientFunds(sender, available, amount));
        }

        if let Some(account) = self.customers.get_mut(&sender) {
            account.balance -= amount;
        }
        if let Some(account) = self.customers.get_mut(&recipient) {
            account.balance += amount;
        }

        let reference = self.fresh_reference();
        let now = Utc::now();

        self.transactions.push(Transaction {
            id: self.next_tx,
            customer: sender,
            kind: TransactionKind::Debit,
            amount,
            description: note
                .map(str::to_string)
                .unwrap_or_else(|| format!("Transfer to {recipient_first}")),
            counterparty: recipient_name.clone(),
            reference: reference.clone(),
            created_at: now,
        });
        self.next_tx += 1;

        self.transactions.push(Transaction {
            id: self.next_tx,
            customer: recipient,
            kind: TransactionKind::Credit,
            amount,
            description: note
                .map(str::to_string)
                .unwrap_or_else(|| format!("Transfer from {sender_first}")),
            counterparty: sender_name.clone(),
            reference: reference.clone(),
            created_at: now,
        });
        self.next_tx += 1;

        self.notify(
            recipient,
            "Payment Received",
            format!("You received ${amount} from {sender_name}"),
        );

        let message = format!("You sent ${amount} to {recipient_name}");
        Ok(Outcome::Transfer(TransferReceipt {
            reference,
            sender,
            recipient,
            amount,
            message,
        }))
    }

    fn record_audit(
        &mut self,
        action: AuditAction,
        target: Option<(CustomerId, &str)>,
        details: String,
    ) {
        self.audit.push(AuditEntry {
            id: self.next_audit,
            admin: self.admin,
            action,
            target: target.map(|(id, _)| id),
            target_name: target.map(|(_, name)| name.to_string()),
            details,
            created_at: Utc::now(),
        });
        self.next_audit += 1;
    }

    fn notify(&mut self, customer: CustomerId, title: &str, message: String) {
        self.notifications.push(Notification {
            id: self.next_notification,
            customer,
            title: title.to_string(),
            message,
            read: false,
            created_at: Utc::now(),
        });
        self.next_notification += 1;
    }

    fn fresh_reference(&mut self) -> String {
        let reference = format!("TRF-{:08}", self.next_reference);
        self.next_reference += 1;
        reference
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().map_or(1, |id| id + 1)
}
