//! Styling helpers for terminal output.
//!
//! The [`MakerStyle`] trait applies ANSI styling via the `colored` crate.
//! Implementations for `&str` and `String` are provided so string literals
//! can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to CLI output.
pub trait MakerStyle {
    fn field_style(&self) -> ColoredString;
    fn value_style(&self) -> ColoredString;
    fn heading_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn detail_style(&self) -> ColoredString;
}

impl MakerStyle for &str {
    fn field_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn value_style(&self) -> ColoredString {
        self.truecolor(102, 208, 250)
    }
    fn heading_style(&self) -> ColoredString {
        self.bold().underline()
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn detail_style(&self) -> ColoredString {
        self.italic().dimmed()
    }
}

impl MakerStyle for String {
    fn field_style(&self) -> ColoredString {
        self.as_str().field_style()
    }
    fn value_style(&self) -> ColoredString {
        self.as_str().value_style()
    }
    fn heading_style(&self) -> ColoredString {
        self.as_str().heading_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn detail_style(&self) -> ColoredString {
        self.as_str().detail_style()
    }
}
