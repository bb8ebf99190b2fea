mod record;

use serde::Serialize;

pub use record::{CSV_HEADERS, TIMESTAMP_FORMAT, TransactionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Approved,
    Declined,
    Refunded,
}
