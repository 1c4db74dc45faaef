//! Sample person record used by the CLI self-test.

use serde_json::{Value, json};

/// Field names of the sample record, in order.
pub const SAMPLE_FIELDS: [&str; 5] = ["first_name", "last_name", "age", "hair_color", "eye_color"];

/// The same names as typed by a careless user; they sanitize to [`SAMPLE_FIELDS`].
pub const SAMPLE_MESSY_FIELDS: [&str; 5] = ["_first_name", "$1_las*t_nam)(e", "+_age", "hair color #", "  4eye color !@"];

/// Values matching [`SAMPLE_FIELDS`].
pub fn sample_values() -> Vec<Value> {
    vec![json!("Alex"), json!("Smith"), json!(45), json!("brown"), json!("green")]
}
