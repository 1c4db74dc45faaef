//! Shared record type for namedtuple-maker.

pub mod record;

pub use record::{NamedRecord, RECORD_TYPE_NAME, RecordError};
