//! Record building around value-producing functions.
//!
//! A [`Converter`] wraps any function that returns a sequence of values. Calling
//! it runs the function with the given arguments, works out a name for each
//! value, cleans the names up, and hands back a [`NamedRecord`] pairing the two
//! position by position.
//!
//! Names come from, in order of preference:
//! 1. [`ConvertOptions::attribute_names`], when present and not empty,
//! 2. auto-naming (`index_0`, `index_1`, ...) when
//!    [`ConvertOptions::auto_attribute_names`] is set,
//! 3. one [`NamePrompt`] question per value otherwise.

use std::collections::VecDeque;
use std::fmt;
use std::io;

use log::{debug, error, info};
use namedtuple_data::{NamedRecord, RecordError};
use serde_json::Value;
use thiserror::Error;

use crate::prompt::{ConsolePrompt, NamePrompt};
use crate::sanitize::sanitize_names;

/// Per-call naming options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Names to use verbatim (before sanitizing), one per value.
    pub attribute_names: Option<Vec<String>>,
    /// Name every value `index_<position>` instead of prompting.
    pub auto_attribute_names: bool,
}

impl ConvertOptions {
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute_names: Some(names.into_iter().map(Into::into).collect()),
            auto_attribute_names: false,
        }
    }

    pub fn auto() -> Self {
        Self {
            attribute_names: None,
            auto_attribute_names: true,
        }
    }

    /// Where the names for a call with these options will come from.
    pub fn name_source(&self) -> NameSource {
        match &self.attribute_names {
            Some(names) if !names.is_empty() => NameSource::Explicit,
            _ if self.auto_attribute_names => NameSource::Auto,
            _ => NameSource::Prompted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Explicit,
    Auto,
    Prompted,
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameSource::Explicit => "explicit",
            NameSource::Auto => "auto",
            NameSource::Prompted => "prompted",
        };
        f.write_str(label)
    }
}

/// Reasons a conversion can fail.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "length of values and attribute names must be equal: values length = {values}, attribute names length = {names}"
    )]
    LengthMismatch { values: usize, names: usize },
    #[error("cannot build record: {0}")]
    Record(RecordError),
    #[error("failed to read an attribute name: {0}")]
    Prompt(#[from] io::Error),
}

impl From<RecordError> for ConvertError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::LengthMismatch { values, names } => ConvertError::LengthMismatch { values, names },
            other => ConvertError::Record(other),
        }
    }
}

/// Conversion of a producer's return value into an ordered value sequence.
pub trait IntoValues<V> {
    /// # Errors
    /// Returns [`ConvertError::InvalidInput`] when the value is not a sequence.
    fn into_value_sequence(self) -> Result<Vec<V>, ConvertError>;
}

impl<V> IntoValues<V> for Vec<V> {
    fn into_value_sequence(self) -> Result<Vec<V>, ConvertError> {
        Ok(self)
    }
}

impl<V, const N: usize> IntoValues<V> for [V; N] {
    fn into_value_sequence(self) -> Result<Vec<V>, ConvertError> {
        Ok(self.into())
    }
}

impl<V> IntoValues<V> for VecDeque<V> {
    fn into_value_sequence(self) -> Result<Vec<V>, ConvertError> {
        Ok(self.into())
    }
}

impl<V> IntoValues<V> for Option<Vec<V>> {
    fn into_value_sequence(self) -> Result<Vec<V>, ConvertError> {
        self.ok_or_else(|| ConvertError::InvalidInput("producer returned nothing to convert".to_string()))
    }
}

/// Only JSON arrays are sequences; strings, objects and scalars are rejected.
impl IntoValues<Value> for Value {
    fn into_value_sequence(self) -> Result<Vec<Value>, ConvertError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(ConvertError::InvalidInput(format!(
                "expected a sequence of values, got {} {other}",
                json_kind(&other)
            ))),
        }
    }
}

/// Read a command-line word as a JSON scalar, keeping it as text otherwise.
///
/// `45` becomes a number and `true` a boolean, while `brown` stays a string.
/// Arrays and objects are kept as text so each word stays one value.
pub fn value_from_text(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if !value.is_array() && !value.is_object() => value,
        _ => Value::String(raw.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds named records, asking `prompt` for names when a call needs them.
pub struct RecordBuilder<P = ConsolePrompt> {
    prompt: P,
}

impl Default for RecordBuilder<ConsolePrompt> {
    fn default() -> Self {
        Self::new(ConsolePrompt::new())
    }
}

impl<P: NamePrompt> RecordBuilder<P> {
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn into_prompt(self) -> P {
        self.prompt
    }

    /// Wrap `producer` so each call returns a record instead of bare values.
    pub fn wrap<F>(self, producer: F) -> Converter<F, P> {
        Converter { producer, builder: self }
    }

    /// Run `producer` and pair its values with names chosen per `options`.
    ///
    /// # Errors
    /// See [`RecordBuilder::name_values`]; additionally
    /// [`ConvertError::InvalidInput`] when the producer's result is not a sequence.
    pub fn build<F, R, V>(&mut self, producer: F, options: &ConvertOptions) -> Result<NamedRecord<V>, ConvertError>
    where
        F: FnOnce() -> R,
        R: IntoValues<V>,
        V: fmt::Display + fmt::Debug,
    {
        let values = producer().into_value_sequence().inspect_err(|err| {
            error!("producer result could not be read as a value sequence: {err}");
        })?;
        self.name_values(values, options)
    }

    /// Pair already-produced `values` with names chosen per `options`.
    ///
    /// # Errors
    /// [`ConvertError::LengthMismatch`] when the name count differs from the value
    /// count, [`ConvertError::Record`] when two names clean up to the same field,
    /// and [`ConvertError::Prompt`] when prompting fails.
    pub fn name_values<V>(&mut self, values: Vec<V>, options: &ConvertOptions) -> Result<NamedRecord<V>, ConvertError>
    where
        V: fmt::Display + fmt::Debug,
    {
        debug!("building record from values {values:?}");
        let mut names = self.resolve_names(&values, options)?;

        sanitize_names(&mut names);

        info!("checking for an equal number of attribute names and values");
        if names.len() != values.len() {
            error!(
                "unequal length of values ({}) and attribute names ({})",
                values.len(),
                names.len()
            );
            return Err(ConvertError::LengthMismatch {
                values: values.len(),
                names: names.len(),
            });
        }

        let record = NamedRecord::new(names, values)?;
        debug!("created record with fields {:?}", record.field_names());
        Ok(record)
    }

    /// Produce the unsanitized candidate names for `values`.
    ///
    /// # Errors
    /// [`ConvertError::Prompt`] when a prompt cannot be read.
    pub fn resolve_names<V>(&mut self, values: &[V], options: &ConvertOptions) -> Result<Vec<String>, ConvertError>
    where
        V: fmt::Display,
    {
        let source = options.name_source();
        info!("resolving attribute names for {} values from {source} source", values.len());

        let names = match (source, &options.attribute_names) {
            (NameSource::Explicit, Some(names)) => names.clone(),
            (NameSource::Auto, _) => vec![String::new(); values.len()],
            _ => {
                let mut names = Vec::with_capacity(values.len());
                for (index, value) in values.iter().enumerate() {
                    names.push(self.prompt.ask(index, value)?);
                }
                names
            },
        };

        debug!("candidate attribute names: {names:?}");
        Ok(names)
    }
}

/// A value-producing function wrapped to return [`NamedRecord`]s.
pub struct Converter<F, P = ConsolePrompt> {
    producer: F,
    builder: RecordBuilder<P>,
}

impl<F, P: NamePrompt> Converter<F, P> {
    /// Call the wrapped function with `args` and name its result.
    ///
    /// `args` reach the producer untouched; only `options` drive naming.
    ///
    /// # Errors
    /// Same as [`RecordBuilder::build`].
    pub fn call<A, R, V>(&mut self, args: A, options: &ConvertOptions) -> Result<NamedRecord<V>, ConvertError>
    where
        F: FnMut(A) -> R,
        R: IntoValues<V>,
        V: fmt::Display + fmt::Debug,
    {
        let producer = &mut self.producer;
        self.builder.build(|| producer(args), options)
    }

    pub fn builder(&self) -> &RecordBuilder<P> {
        &self.builder
    }

    pub fn into_parts(self) -> (F, RecordBuilder<P>) {
        (self.producer, self.builder)
    }
}

/// Wrap `producer` with console prompting for names.
///
/// ```
/// use namedtuple_maker::{ConvertOptions, named_tuple_converter};
///
/// let mut scores = named_tuple_converter(|base: i32| vec![base, base * 2]);
/// let record = scores.call(3, &ConvertOptions::named(["single", "double"])).unwrap();
/// assert_eq!(record["double"], 6);
/// ```
pub fn named_tuple_converter<F>(producer: F) -> Converter<F, ConsolePrompt> {
    RecordBuilder::new(ConsolePrompt::new()).wrap(producer)
}

/// Name an existing sequence of values.
///
/// # Errors
/// Same as [`RecordBuilder::build`].
pub fn make_named_tuple<R, V>(values: R, options: &ConvertOptions) -> Result<NamedRecord<V>, ConvertError>
where
    R: IntoValues<V>,
    V: fmt::Display + fmt::Debug,
{
    RecordBuilder::new(ConsolePrompt::new()).build(|| values, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use serde_json::json;

    fn scripted<const N: usize>(answers: [&str; N]) -> RecordBuilder<ScriptedPrompt> {
        RecordBuilder::new(ScriptedPrompt::new(answers))
    }

    #[test]
    fn explicit_names_pair_with_values() {
        let record = make_named_tuple(vec![1, 2, 3], &ConvertOptions::named(["a", "b", "c"])).unwrap();
        assert_eq!(record.field_names(), vec!["a", "b", "c"]);
        assert_eq!((record["a"], record["b"], record["c"]), (1, 2, 3));
    }

    #[test]
    fn auto_names_use_positions() {
        let values = json!(["Alex", "Smith", 45, "brown", "green"]);
        let record = make_named_tuple(values, &ConvertOptions::auto()).unwrap();
        assert_eq!(
            record.field_names(),
            vec!["index_0", "index_1", "index_2", "index_3", "index_4"]
        );
        assert_eq!(record["index_2"], json!(45));
    }

    #[test]
    fn explicit_names_win_over_auto() {
        let options = ConvertOptions {
            attribute_names: Some(vec!["x".into()]),
            auto_attribute_names: true,
        };
        assert_eq!(options.name_source(), NameSource::Explicit);
        let record = make_named_tuple(vec![7], &options).unwrap();
        assert_eq!(record.field_names(), vec!["x"]);
    }

    #[test]
    fn empty_explicit_names_fall_through() {
        let options = ConvertOptions {
            attribute_names: Some(Vec::new()),
            auto_attribute_names: true,
        };
        assert_eq!(options.name_source(), NameSource::Auto);
        assert_eq!(ConvertOptions::named(Vec::<String>::new()).name_source(), NameSource::Prompted);
    }

    #[test]
    fn prompts_once_per_value_in_order() {
        let mut builder = scripted(["first name", "  last name!", ""]);
        let record = builder.name_values(vec!["Alex", "Smith", "x"], &ConvertOptions::default()).unwrap();
        assert_eq!(record.field_names(), vec!["first_name", "last_name", "index_2"]);

        let shown = builder.prompt().shown();
        assert_eq!(shown.len(), 3);
        assert!(shown[0].contains("\"Alex\""));
        assert!(shown[1].contains("\"Smith\""));
    }

    #[test]
    fn auto_naming_never_prompts() {
        let mut builder = scripted(["unused"]);
        builder.name_values(vec![1, 2], &ConvertOptions::auto()).unwrap();
        assert!(builder.prompt().shown().is_empty());
        assert_eq!(builder.into_prompt().remaining(), 1);
    }

    #[test]
    fn mismatched_counts_fail_with_both_lengths() {
        let err = make_named_tuple(vec![1, 2], &ConvertOptions::named(["a"])).unwrap_err();
        assert!(matches!(err, ConvertError::LengthMismatch { values: 2, names: 1 }));
        assert!(err.to_string().contains("values length = 2"));
    }

    #[test]
    fn names_cleaning_to_the_same_field_are_rejected() {
        let err = make_named_tuple(vec![1, 2], &ConvertOptions::named(["age", "$age"])).unwrap_err();
        assert!(matches!(err, ConvertError::Record(RecordError::DuplicateField { .. })));
    }

    #[test]
    fn non_sequence_json_is_invalid_input() {
        let err = make_named_tuple(json!({"a": 1}), &ConvertOptions::auto()).unwrap_err();
        match err {
            ConvertError::InvalidInput(message) => assert!(message.contains("object")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            make_named_tuple(json!(5), &ConvertOptions::auto()),
            Err(ConvertError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_producer_result_is_invalid_input() {
        let nothing: Option<Vec<i32>> = None;
        assert!(matches!(
            make_named_tuple(nothing, &ConvertOptions::auto()),
            Err(ConvertError::InvalidInput(_))
        ));
    }

    #[test]
    fn converter_forwards_arguments() {
        let mut calls = Vec::new();
        let mut converter = RecordBuilder::new(ScriptedPrompt::default()).wrap(|(a, b): (i32, i32)| {
            calls.push((a, b));
            [a + b, a * b]
        });
        let record = converter.call((2, 5), &ConvertOptions::named(["sum", "product"])).unwrap();
        assert_eq!(record["sum"], 7);
        assert_eq!(record["product"], 10);
        let record = converter.call((1, 1), &ConvertOptions::auto()).unwrap();
        assert_eq!(record.field_names(), vec!["index_0", "index_1"]);
        drop(converter);
        assert_eq!(calls, vec![(2, 5), (1, 1)]);
    }

    #[test]
    fn command_line_words_become_scalars() {
        assert_eq!(value_from_text("45"), json!(45));
        assert_eq!(value_from_text("4.5"), json!(4.5));
        assert_eq!(value_from_text("true"), json!(true));
        assert_eq!(value_from_text("brown"), json!("brown"));
        assert_eq!(value_from_text("[1,2]"), json!("[1,2]"));
    }

    #[test]
    fn empty_sequences_produce_empty_records() {
        let record = make_named_tuple(Vec::<i32>::new(), &ConvertOptions::auto()).unwrap();
        assert!(record.is_empty());
    }
}
