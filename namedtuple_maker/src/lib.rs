#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

//! Turn functions that return a sequence of values into functions that return a
//! [`NamedRecord`]: an immutable, ordered record whose fields are addressable
//! by name and by position.
//!
//! ```
//! use namedtuple_maker::{ConvertOptions, make_named_tuple};
//!
//! let record = make_named_tuple(vec![1, 2, 3], &ConvertOptions::named(["a", "b", "c"])).unwrap();
//! assert_eq!(record.to_string(), "NamedTuple(a=1, b=2, c=3)");
//!
//! let record = make_named_tuple(vec!["Alex", "Smith"], &ConvertOptions::auto()).unwrap();
//! assert_eq!(record.field_names(), vec!["index_0", "index_1"]);
//! ```

pub const MAKER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod converter;
pub mod graceful_exit;
pub mod logging;
pub mod prompt;
pub mod sample;
pub mod sanitize;
pub mod style;

// Re-exports for convenience
pub use converter::{
    ConvertError, ConvertOptions, Converter, IntoValues, NameSource, RecordBuilder, make_named_tuple,
    named_tuple_converter,
};
pub use graceful_exit::graceful_exit;
pub use logging::{LogConfig, LoggingContext, LoggingError, init_logging};
pub use namedtuple_data::{NamedRecord, RecordError};
pub use prompt::{ConsolePrompt, NamePrompt, ScriptedPrompt};
pub use sanitize::{sanitize_name, sanitize_names};
