//! Error types for intent processing.

use thiserror::Error;

use crate::Amount;
use crate::model::{CustomerId, RequestId};

/// Top-level error returned by [`Engine::apply`](super::Engine::apply).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Account(#[from] AccountError),

    #[error("card request failed: {0}")]
    Card(#[from] CardError),

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

/// The account operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Block,
    Freeze,
    Unblock,
    ToggleSendMoney,
    ToggleLogin,
}

/// Error during status changes and permission toggles.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0:?}: customer {1} not found")]
    CustomerNotFound(AccountAction, CustomerId),
}

/// Error during card request processing.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("request {0} not found")]
    RequestNotFound(RequestId),

    #[error("request {0} was already processed")]
    AlreadyProcessed(RequestId),
}

/// Error during transfer processing.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid amount {0}")]
    InvalidAmount(Amount),

    #[error("insufficient funds for customer {0}: available {1}, requested {2}")]
    InsufficientFunds(CustomerId, Amount, Amount),

    #[error("sender {0} not found")]
    SenderNotFound(CustomerId),

    #[error("recipient {0} not found")]
    RecipientNotFound(CustomerId),

    #[error("customer {0} is not allowed to send money")]
    SendingDisabled(CustomerId),
}

/// Error during a login attempt.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("identifier and password are required")]
    EmptyCredentials,

    #[error("no customer matches the given identifier")]
    UnknownCustomer,

    #[error("login is disabled for customer {0}")]
    LoginDisabled(CustomerId),
}
