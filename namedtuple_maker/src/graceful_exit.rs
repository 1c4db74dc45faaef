//! Ending the process after an unrecoverable error without a panic or backtrace.

use std::error::Error;
use std::process;

use log::error;

use crate::style::MakerStyle;

/// Exit status used by [`graceful_exit`].
pub const EXIT_FAILURE: i32 = 1;

/// Lines [`graceful_exit`] prints: the friendly message for stdout and the
/// error description for stderr.
pub fn exit_message(message: Option<&str>, err: Option<&dyn Error>) -> (Option<String>, Option<String>) {
    let stdout = message.map(|message| format!("\n{message}"));
    let stderr = err.map(|err| {
        let mut text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        text
    });
    (stdout, stderr)
}

/// Print `message` and `err` and end the process with [`EXIT_FAILURE`].
pub fn graceful_exit(message: Option<&str>, err: Option<&dyn Error>) -> ! {
    if let Some(err) = err {
        error!("exiting after unrecoverable error: {err}");
    }
    let (stdout, stderr) = exit_message(message, err);
    if let Some(text) = stdout {
        println!("{text}");
    }
    if let Some(text) = stderr {
        eprintln!("{}", text.error_style());
    }
    log::logger().flush();
    process::exit(EXIT_FAILURE)
}
