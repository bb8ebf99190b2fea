use csv::WriterBuilder;
use rand::Rng;

use crate::generator::RecordFactory;
use crate::models::CSV_HEADERS;

/// Serializes one header row plus `batch_size` fresh records as UTF-8 CSV
/// bytes, every line terminated by a single `\n`.
///
/// A `batch_size` of zero is legal and yields a header-only payload.
pub fn build_batch<R: Rng>(
    factory: &RecordFactory,
    rng: &mut R,
    batch_size: usize,
) -> Result<Vec<u8>, csv::Error> {
    let mut buffer = Vec::new();

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(&mut buffer);

    //NOTE: The header is written explicitly rather than derived from the
    //      first record, so an empty batch still carries it.
    writer.write_record(CSV_HEADERS)?;

    for _ in 0..batch_size {
        writer.serialize(factory.make_record(rng))?;
    }

    writer.flush()?;
    drop(writer);

    Ok(buffer)
}
