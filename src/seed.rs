//! Deterministic mock dataset.
//!
//! The same records are produced on every call so each process start sees an
//! identical world. There is no persistence; anything the engine mutates is
//! gone on restart.

use chrono::{DateTime, TimeZone, Utc};

use crate::Amount;
use crate::engine::{Customer, Dataset, Engine};
use crate::model::{
    AccountStatus, AdminId, AuditAction, AuditEntry, CardRequest, CardStatus, CardType,
    Notification, RequestStatus, Transaction, TransactionKind,
};

/// Administrator acting in the seeded session.
pub const ADMIN: AdminId = 1;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// A fully seeded engine.
pub fn engine() -> Engine {
    Engine::load(ADMIN, dataset())
}

/// The complete seed dataset.
pub fn dataset() -> Dataset {
    Dataset {
        customers: customers(),
        card_requests: card_requests(),
        transactions: transactions(),
        audit_log: audit_log(),
        notifications: notifications(),
    }
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: 1,
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            account_number: "2847391056".to_string(),
            balance: Amount::from_float(12450.75),
            status: AccountStatus::Active,
            card_status: CardStatus::Approved,
            can_send_money: true,
            can_login: true,
            created_at: date(2024, 1, 15),
        },
        Customer {
            id: 2,
            name: "Michael Chen".to_string(),
            email: "michael.chen@email.com".to_string(),
            phone: "+1 (555) 234-5678".to_string(),
            account_number: "3958472061".to_string(),
            balance: Amount::from_float(8234.50),
            status: AccountStatus::Active,
            card_status: CardStatus::Pending,
            can_send_money: true,
            can_login: true,
            created_at: date(2024, 2, 20),
        },
        Customer {
            id: 3,
            name: "Emma Wilson".to_string(),
            email: "emma.wilson@email.com".to_string(),
            phone: "+1 (555) 345-6789".to_string(),
            account_number: "1726384950".to_string(),
            balance: Amount::from_float(45780.00),
            status: AccountStatus::Frozen,
            card_status: CardStatus::Approved,
            can_send_money: false,
            can_login: true,
            created_at: date(2023, 11, 8),
        },
        Customer {
            id: 4,
            name: "James Rodriguez".to_string(),
            email: "james.rodriguez@email.com".to_string(),
            phone: "+1 (555) 456-7890".to_string(),
            account_number: "4839201756".to_string(),
            balance: Amount::from_float(2150.25),
            status: AccountStatus::Blocked,
            card_status: CardStatus::None,
            can_send_money: false,
            can_login: false,
            created_at: date(2024, 3, 1),
        },
        Customer {
            id: 5,
            name: "Olivia Brown".to_string(),
            email: "olivia.brown@email.com".to_string(),
            phone: "+1 (555) 567-8901".to_string(),
            account_number: "6729384015".to_string(),
            balance: Amount::from_float(18965.80),
            status: AccountStatus::Active,
            card_status: CardStatus::None,
            can_send_money: true,
            can_login: true,
            created_at: date(2024, 1, 28),
        },
    ]
}

pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            customer: 1,
            kind: TransactionKind::Credit,
            amount: Amount::from_float(2500.00),
            description: "Salary Deposit".to_string(),
            counterparty: "ABC Corporation".to_string(),
            reference: "SAL-2024-001".to_string(),
            created_at: datetime(2024, 12, 15, 10, 30),
        },
        Transaction {
            id: 2,
            customer: 1,
            kind: TransactionKind::Debit,
            amount: Amount::from_float(85.50),
            description: "Grocery Store".to_string(),
            counterparty: "Whole Foods Market".to_string(),
            reference: "POS-2024-4521".to_string(),
            created_at: datetime(2024, 12, 14, 14, 22),
        },
        Transaction {
            id: 3,
            customer: 1,
            kind: TransactionKind::Debit,
            amount: Amount::from_float(250.00),
            description: "Transfer to Michael".to_string(),
            counterparty: "Michael Chen".to_string(),
            reference: "TRF-2024-0892".to_string(),
            created_at: datetime(2024, 12, 13, 9, 15),
        },
        Transaction {
            id: 4,
            customer: 1,
            kind: TransactionKind::Credit,
            amount: Amount::from_float(150.00),
            description: "Refund".to_string(),
            counterparty: "Amazon".to_string(),
            reference: "REF-2024-3847".to_string(),
            created_at: datetime(2024, 12, 12, 16, 45),
        },
        Transaction {
            id: 5,
            customer: 1,
            kind: TransactionKind::Debit,
            amount: Amount::from_float(45.99),
            description: "Streaming Subscription".to_string(),
            counterparty: "Netflix".to_string(),
            reference: "SUB-2024-1234".to_string(),
            created_at: datetime(2024, 12, 11, 0, 0),
        },
        Transaction {
            id: 6,
            customer: 2,
            kind: TransactionKind::Credit,
            amount: Amount::from_float(1800.00),
            description: "Freelance Payment".to_string(),
            counterparty: "Design Co.".to_string(),
            reference: "FRL-2024-445".to_string(),
            created_at: datetime(2024, 12, 15, 11, 0),
        },
        Transaction {
            id: 7,
            customer: 2,
            kind: TransactionKind::Debit,
            amount: Amount::from_float(120.00),
            description: "Electric Bill".to_string(),
            counterparty: "City Power".to_string(),
            reference: "BILL-2024-789".to_string(),
            created_at: datetime(2024, 12, 10, 8, 30),
        },
    ]
}

pub fn card_requests() -> Vec<CardRequest> {
    vec![
        CardRequest {
            id: 1,
            customer: 2,
            customer_name: "Michael Chen".to_string(),
            card_type: CardType::Debit,
            status: RequestStatus::Pending,
            requested_at: datetime(2024, 12, 14, 10, 0),
            processed_at: None,
        },
        CardRequest {
            id: 2,
            customer: 5,
            customer_name: "Olivia Brown".to_string(),
            card_type: CardType::Credit,
            status: RequestStatus::Pending,
            requested_at: datetime(2024, 12, 13, 15, 30),
            processed_at: None,
        },
    ]
}

pub fn audit_log() -> Vec<AuditEntry> {
    vec![
        AuditEntry {
            id: 1,
            admin: ADMIN,
            action: AuditAction::BlockCustomer,
            target: Some(4),
            target_name: Some("James Rodriguez".to_string()),
            details: "Account blocked due to suspicious activity".to_string(),
            created_at: datetime(2024, 12, 15, 9, 0),
        },
        AuditEntry {
            id: 2,
            admin: ADMIN,
            action: AuditAction::FreezeAccount,
            target: Some(3),
            target_name: Some("Emma Wilson".to_string()),
            details: "Account frozen pending verification".to_string(),
            created_at: datetime(2024, 12, 14, 14, 30),
        },
        AuditEntry {
            id: 3,
            admin: ADMIN,
            action: AuditAction::ApproveCard,
            target: Some(1),
            target_name: Some("Sarah Johnson".to_string()),
            details: "Debit card request approved".to_string(),
            created_at: datetime(2024, 12, 13, 11, 15),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            customer: 1,
            title: "Payment Received".to_string(),
            message: "You received $2,500.00 from ABC Corporation".to_string(),
            read: false,
            created_at: datetime(2024, 12, 15, 10, 30),
        },
        Notification {
            id: 2,
            customer: 1,
            title: "Card Approved".to_string(),
            message: "Your debit card request has been approved!".to_string(),
            read: true,
            created_at: datetime(2024, 12, 13, 11, 15),
        },
    ]
}
