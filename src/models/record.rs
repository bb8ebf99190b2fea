use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TransactionStatus;

/// Timestamp layout shared by `txn_ts_utc` and `ingested_at`, chosen for
/// warehouse-friendly ingestion (second precision, no zone suffix).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order for every batch. The header row and the serialized field
/// order of [`TransactionRecord`] must agree with this list exactly.
pub const CSV_HEADERS: [&str; 11] = [
    "txn_id",
    "txn_ts_utc",
    "region",
    "merchant",
    "customer_id",
    "payment_method",
    "currency",
    "amount",
    "status",
    "is_refund",
    "ingested_at",
];

/// One synthetic transaction row, serialized as a single CSV data line.
///
/// Every field ends up as text. Records are independent of each other:
/// nothing references a prior record or a prior batch.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    /// Globally unique identifier, hyphenated UUIDv4 form.
    pub txn_id: String,
    /// UTC wall clock at generation time.
    pub txn_ts_utc: String,
    /// Region code drawn from the reference set.
    pub region: String,
    /// Merchant name drawn from the reference set.
    pub merchant: String,
    /// Synthetic customer identifier; not unique across records.
    pub customer_id: String,
    /// Payment method drawn from the reference set.
    pub payment_method: String,
    /// Currency code; the reference set carries a single entry.
    pub currency: String,
    /// Scale-2 decimal amount; `0.00` for declined transactions.
    pub amount: Decimal,
    /// Outcome of the weighted status draw.
    pub status: TransactionStatus,
    /// `true` exactly when `status` is `REFUNDED`.
    pub is_refund: bool,
    /// Second UTC wall-clock read, taken after the other fields.
    pub ingested_at: String,
}
