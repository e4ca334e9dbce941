use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::engine::Customer;
use crate::model::{CustomerId, RequestId};
use crate::{Amount, Intent};

/// Errors that can occur when parsing intent script rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: {action} missing {field}")]
    MissingField {
        line: usize,
        action: String,
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    customer: Option<CustomerId>,
    target: Option<CustomerId>,
    request: Option<RequestId>,
    amount: Option<f64>,
    note: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    id: CustomerId,
    name: String,
    status: String,
    balance: String,
    card_status: String,
    can_send_money: bool,
    can_login: bool,
}

fn required<T>(
    value: Option<T>,
    line: usize,
    action: &str,
    field: &'static str,
) -> Result<T, CsvError> {
    value.ok_or_else(|| CsvError::MissingField {
        line,
        action: action.to_string(),
        field,
    })
}

/// Read an intent script from a csv file
pub fn read_intents(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Intent, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let action = row.action.as_str();
            match action {
                "block" => Ok(Intent::Block {
                    customer: required(row.customer, line, action, "customer")?,
                }),
                "freeze" => Ok(Intent::Freeze {
                    customer: required(row.customer, line, action, "customer")?,
                }),
                "unblock" => Ok(Intent::Unblock {
                    customer: required(row.customer, line, action, "customer")?,
                }),
                "toggle_send_money" => Ok(Intent::ToggleSendMoney {
                    customer: required(row.customer, line, action, "customer")?,
                }),
                "toggle_login" => Ok(Intent::ToggleLogin {
                    customer: required(row.customer, line, action, "customer")?,
                }),
                "approve_card" => Ok(Intent::ApproveCard {
                    request: required(row.request, line, action, "request")?,
                }),
                "reject_card" => Ok(Intent::RejectCard {
                    request: required(row.request, line, action, "request")?,
                }),
                "send" => Ok(Intent::Send {
                    sender: required(row.customer, line, action, "customer")?,
                    recipient: required(row.target, line, action, "target")?,
                    amount: Amount::from_float(required(row.amount, line, action, "amount")?),
                    note: row.note.filter(|n| !n.is_empty()),
                }),
                other => Err(CsvError::UnrecognizedAction {
                    line,
                    action: other.to_string(),
                }),
            }
        })
}

/// write customer snapshots to stdout in csv format
pub fn write_customers<'a>(customers: impl IntoIterator<Item = &'a Customer>) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for customer in customers {
        let row = OutputRow {
            id: customer.id,
            name: customer.name.clone(),
            status: customer.status.to_string(),
            balance: customer.balance.to_string(),
            card_status: customer.card_status.to_string(),
            can_send_money: customer.can_send_money,
            can_login: customer.can_login,
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}
