use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use uuid::Builder;

use crate::models::{TIMESTAMP_FORMAT, TransactionRecord, TransactionStatus};

const PROBABILITY_APPROVED: f64 = 0.85;
const PROBABILITY_DECLINED: f64 = 0.10;
//NOTE: The remaining 5% of the probability mass becomes refunds.

const AMOUNT_MIN_CENTS: i64 = 100;
const AMOUNT_MAX_CENTS: i64 = 25_000;
const AMOUNT_SCALE: u32 = 2;

const CUSTOMER_ID_PREFIX: &str = "CUST";
const CUSTOMER_ID_MIN: u32 = 100_000;
const CUSTOMER_ID_MAX: u32 = 999_999;

/// Immutable reference value sets the factory draws from.
///
/// Injected at startup so tests can substitute alternate sets. Every set
/// must contain at least one entry; the currency set intentionally carries
/// only `USD` so the amount column stays consistent with its meaning.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub regions: Vec<String>,
    pub merchants: Vec<String>,
    pub payment_methods: Vec<String>,
    pub currencies: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            regions: to_strings(&["US-EAST", "US-WEST", "US-CENTRAL"]),
            merchants: to_strings(&["AlphaShop", "BetaMart", "GammaFoods", "DeltaRide", "ElectroMart"]),
            payment_methods: to_strings(&["CARD", "WALLET", "BANK_TRANSFER", "UPI"]),
            currencies: to_strings(&["USD"]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Produces synthetic transaction records from injected reference data and
/// an injected random source.
pub struct RecordFactory {
    reference: ReferenceData,
}

impl RecordFactory {
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Creates one transaction record.
    ///
    /// Consumes entropy only from `rng`, so a seeded generator yields a
    /// deterministic sequence of records apart from the two wall-clock
    /// timestamp fields.
    pub fn make_record<R: Rng>(&self, rng: &mut R) -> TransactionRecord {
        let txn_id = next_txn_id(rng);
        let txn_ts_utc = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let region = self.pick(rng, |reference| &reference.regions);
        let merchant = self.pick(rng, |reference| &reference.merchants);
        let customer_id = format!(
            "{}-{}",
            CUSTOMER_ID_PREFIX,
            rng.gen_range(CUSTOMER_ID_MIN..=CUSTOMER_ID_MAX)
        );
        let payment_method = self.pick(rng, |reference| &reference.payment_methods);
        let currency = self.pick(rng, |reference| &reference.currencies);

        let drawn_amount = Decimal::new(
            rng.gen_range(AMOUNT_MIN_CENTS..=AMOUNT_MAX_CENTS),
            AMOUNT_SCALE,
        );
        let roll: f64 = rng.gen_range(0.0..1.0);

        let (status, is_refund, amount) = if roll < PROBABILITY_APPROVED {
            (TransactionStatus::Approved, false, drawn_amount)
        } else if roll < PROBABILITY_APPROVED + PROBABILITY_DECLINED {
            (TransactionStatus::Declined, false, Decimal::new(0, AMOUNT_SCALE))
        } else {
            //NOTE: Refund amounts stay positive on purpose; the sign is
            //      carried by the status column, not the amount.
            (TransactionStatus::Refunded, true, drawn_amount)
        };

        let ingested_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();

        TransactionRecord {
            txn_id,
            txn_ts_utc,
            region,
            merchant,
            customer_id,
            payment_method,
            currency,
            amount,
            status,
            is_refund,
            ingested_at,
        }
    }

    fn pick<R: Rng>(&self, rng: &mut R, select: fn(&ReferenceData) -> &Vec<String>) -> String {
        select(&self.reference)
            .choose(rng)
            .expect("reference sets must not be empty")
            .clone()
    }
}

fn next_txn_id<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    Builder::from_random_bytes(bytes).into_uuid().to_string()
}
