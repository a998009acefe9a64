//! Error reporting on stderr with optional color.
//!
//! Format: `✖ {error_type}: {message}`

use std::io::{IsTerminal, Write};

use super::ColorMode;
use super::ansi;

pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => Self::stderr_supports_color(),
        };
        Self { use_colors }
    }

    /// Creates an error output formatter that auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    fn stderr_supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal()
    }

    pub fn print_error(&self, error_type: &str, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, error_type, message);
    }

    /// Writes one error line to `w`. Write failures are ignored since there
    /// is nowhere left to report them.
    pub fn write_error<W: Write>(&self, w: &mut W, error_type: &str, message: &str) {
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}✖ {error_type}:{} {message}",
                ansi::BOLD,
                ansi::RED,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "✖ {error_type}: {message}");
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

/// Prints an error using auto-detected color mode.
pub fn print_error(error_type: &str, message: &str) {
    ErrorOutput::stderr().print_error(error_type, message);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
