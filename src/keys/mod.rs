
use chrono::Utc;
use rand::Rng;

const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Builds the destination object key for one batch.
///
/// The prefix is normalized to exactly one trailing `/` (the caller's value
/// is never mutated). Flat layout appends the filename directly; partitioned
/// layout inserts `date=YYYY-MM-DD/hour=HH/` segments derived from the
/// current UTC clock.
pub fn build_key(prefix: &str, filename: &str, partitioned: bool) -> String {
    let mut key = prefix.to_string();

    if !key.ends_with('/') {
        key.push('/');
    }

    if partitioned {
        let now = Utc::now();
        key.push_str(&format!("date={}/hour={}/", now.format("%Y-%m-%d"), now.format("%H")));
    }

    key.push_str(filename);
    key
}

/// Names one batch file: `transactions_<UTC timestamp>_<6 hex chars>.csv`.
///
/// The compact timestamp plus the random suffix keeps keys from colliding
/// even when two iterations land in the same second.
pub fn build_filename<R: Rng>(rng: &mut R) -> String {
    let timestamp = Utc::now().format(FILENAME_TIMESTAMP_FORMAT);
    let suffix: u32 = rng.gen_range(0..=0xFF_FFFF);

    format!("transactions_{timestamp}_{suffix:06x}.csv")
}
