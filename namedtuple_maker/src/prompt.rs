//! Interactive collection of attribute names.
//!
//! The record builder asks for one name per value, in value order. Answers are
//! taken as typed; cleaning them up is the sanitizer's job.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

use log::{info, warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Source of attribute names for values that arrived without one.
pub trait NamePrompt {
    /// Ask for the name of `value`, which sits at position `index`.
    ///
    /// # Errors
    /// Returns an error only when the underlying input cannot be read at all.
    /// End of input is an empty answer, not an error.
    fn ask(&mut self, index: usize, value: &dyn fmt::Display) -> io::Result<String>;
}

impl<P: NamePrompt + ?Sized> NamePrompt for &mut P {
    fn ask(&mut self, index: usize, value: &dyn fmt::Display) -> io::Result<String> {
        (**self).ask(index, value)
    }
}

/// Text shown when asking for the name of `value`.
pub fn prompt_text(value: &dyn fmt::Display) -> String {
    format!("Enter an attribute name for the value {}: ", quoted(value))
}

/// `value` in double quotes, unless its display form already carries them
/// (JSON strings do).
fn quoted(value: &dyn fmt::Display) -> String {
    let shown = value.to_string();
    if shown.len() >= 2 && shown.starts_with('"') && shown.ends_with('"') {
        shown
    } else {
        format!("\"{shown}\"")
    }
}

/// Outcome of reading one line from the console.
enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Console-backed prompt.
///
/// Prefers `rustyline` when stdin is a terminal, falling back to a plain
/// stdin reader otherwise. The backend is only set up on the first prompt.
#[derive(Default)]
pub struct ConsolePrompt {
    backend: Option<Backend>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self { backend: None }
    }

    fn connect() -> Backend {
        if io::stdin().is_terminal() {
            match DefaultEditor::new() {
                Ok(editor) => {
                    info!("using rustyline-backed name prompts");
                    Backend::Rustyline(Box::new(editor))
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::Plain
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode for name prompts");
            Backend::Plain
        }
    }

    /// Read a line, switching to plain stdin and retrying once if rustyline fails.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let backend = self.backend.get_or_insert_with(Self::connect);
        match backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) if backend.is_rustyline() => {
                warn!("rustyline input failed: {err} -- switching to basic stdin");
                *backend = Backend::Plain;
                backend.read_line(prompt)
            },
            Err(err) => Err(err),
        }
    }
}

impl NamePrompt for ConsolePrompt {
    fn ask(&mut self, index: usize, value: &dyn fmt::Display) -> io::Result<String> {
        let answer = match self.read_line(&prompt_text(value))? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                info!("end of input while naming attribute {index}; leaving it blank");
                String::new()
            },
            InputEvent::Interrupted => {
                info!("prompt for attribute {index} interrupted; leaving it blank");
                String::new()
            },
        };
        info!("user input the attribute name \"{answer}\" for the value {}", quoted(value));
        Ok(answer)
    }
}

enum Backend {
    Rustyline(Box<DefaultEditor>),
    Plain,
}

impl Backend {
    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.readline(prompt).map(InputEvent::Line).or_else(convert_readline_error),
            Backend::Plain => {
                print!("{prompt}");
                io::stdout().flush()?;
                read_plain_line(&mut io::stdin().lock())
            },
        }
    }
}

fn read_plain_line(reader: &mut impl BufRead) -> io::Result<InputEvent> {
    let mut buffer = String::new();
    if reader.read_line(&mut buffer)? == 0 {
        return Ok(InputEvent::Eof);
    }
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(InputEvent::Line(buffer))
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

/// Prompt that replays a fixed list of answers.
///
/// Once the answers run out every further prompt gets an empty answer.
/// Every prompt text it was asked is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    /// Prompt texts shown so far, in order.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl NamePrompt for ScriptedPrompt {
    fn ask(&mut self, _index: usize, value: &dyn fmt::Display) -> io::Result<String> {
        self.shown.push(prompt_text(value));
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
