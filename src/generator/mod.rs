mod batch;
mod record_factory;

pub use batch::build_batch;
pub use record_factory::{RecordFactory, ReferenceData};
