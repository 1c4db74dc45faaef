//! Attribute name sanitizing.
//!
//! Turns arbitrary user-entered text into names that a [`NamedRecord`] will
//! accept: letter-led, made of ASCII letters, digits, `_` and `-`, with
//! inner whitespace folded into underscores. A name that has nothing left
//! after cleaning becomes `index_<position>`.
//!
//! [`NamedRecord`]: namedtuple_data::NamedRecord

use std::borrow::Cow;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

lazy_static! {
    /// Leading run of anything that is not an ASCII letter.
    static ref START_CHARACTERS: Regex = compile_pattern(r"^[^a-zA-Z]+");
    /// Anything other than ASCII letters, digits, `_`, `-`, or whitespace.
    static ref INVALID_CHARACTERS: Regex = compile_pattern(r"[^a-zA-Z0-9_\s-]");
    static ref SPACE_CHARACTERS: Regex = compile_pattern(r"\s");
}

fn compile_pattern(pattern: &str) -> Regex {
    let regex = Regex::new(pattern).expect("attribute name pattern must compile");
    debug!("compiled regular expression with pattern: {pattern}");
    regex
}

/// Name given to the value at `index` when no usable name was supplied.
pub fn fallback_name(index: usize) -> String {
    format!("index_{index}")
}

/// Clean a single attribute name destined for position `index`.
///
/// ```
/// use namedtuple_maker::sanitize::sanitize_name;
///
/// assert_eq!(sanitize_name("  4eye color !@", 4), "eye_color");
/// assert_eq!(sanitize_name("$1_las*t_nam)(e", 1), "last_name");
/// assert_eq!(sanitize_name("!!!", 2), "index_2");
/// ```
pub fn sanitize_name(raw: &str, index: usize) -> String {
    let stripped = START_CHARACTERS.replace(raw.trim(), "");
    debug!("attribute {index}: removed surrounding spaces and invalid start characters, now \"{stripped}\"");

    let cleaned = INVALID_CHARACTERS.replace_all(stripped.trim(), "");
    debug!("attribute {index}: removed invalid characters, now \"{cleaned}\"");

    let joined: Cow<'_, str> = SPACE_CHARACTERS.replace_all(cleaned.trim(), "_");
    debug!("attribute {index}: replaced space characters, now \"{joined}\"");

    if joined.is_empty() {
        let name = fallback_name(index);
        debug!("attribute {index} is blank, created attribute name \"{name}\"");
        name
    } else {
        joined.into_owned()
    }
}

/// Sanitize every candidate name in place, keeping positions.
pub fn sanitize_names(names: &mut [String]) {
    info!("start attribute name validation for {} names", names.len());
    for (index, name) in names.iter_mut().enumerate() {
        debug!("validating attribute index {index} with the starting value \"{name}\"");
        *name = sanitize_name(name, index);
    }
    info!("attribute validation complete: {names:?}");
}

/// Owning variant of [`sanitize_names`].
pub fn sanitized<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    sanitize_names(&mut names);
    names
}

/// True when `name` already satisfies the rules [`sanitize_name`] enforces.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messy_sample_names_are_cleaned() {
        let names = sanitized(["_first_name", "$1_las*t_nam)(e", "+_age", "hair color #", "  4eye color !@"]);
        assert_eq!(names, vec!["first_name", "last_name", "age", "hair_color", "eye_color"]);
    }

    #[test]
    fn blank_and_symbol_only_names_fall_back_to_index() {
        let names = sanitized(["", "   ", "!@#$", "1234", "_"]);
        assert_eq!(names, vec!["index_0", "index_1", "index_2", "index_3", "index_4"]);
    }

    #[test]
    fn hyphens_and_digits_survive_after_the_first_letter() {
        assert_eq!(sanitize_name("x-ray 2", 0), "x-ray_2");
        assert_eq!(sanitize_name("-abc", 0), "abc");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(sanitize_name("éclair", 0), "clair");
        assert_eq!(sanitize_name("naïve name", 3), "nave_name");
        assert_eq!(sanitize_name("日本", 7), "index_7");
    }

    #[test]
    fn inner_whitespace_of_any_kind_becomes_underscore() {
        assert_eq!(sanitize_name("a\tb\nc", 0), "a_b_c");
        assert_eq!(sanitize_name("a  b", 0), "a__b");
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        let once = sanitized(["  hair color #", "", "x-ray", "9lives"]);
        let twice = sanitized(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn fallback_names_keep_their_own_index() {
        // An auto-generated name moved to another position is left alone.
        assert_eq!(sanitize_name("index_3", 0), "index_3");
    }

    #[test]
    fn validity_predicate_matches_output_shape() {
        assert!(is_valid_name("hair_color"));
        assert!(is_valid_name("index_0"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("_private"));
        assert!(!is_valid_name("4eyes"));
        assert!(!is_valid_name("hair color"));
    }
}
