use std::fmt::Write;

use crate::error::Result;
use crate::result::{Checker, IssueLevel, ResultContainer};

use super::{OutputFormatter, ansi};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose > 0` every issue is listed under its checker.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn level_color(level: IssueLevel) -> &'static str {
        match level {
            IssueLevel::Error => ansi::RED,
            IssueLevel::Warning => ansi::YELLOW,
            IssueLevel::Info => ansi::CYAN,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn format_counts(&self, errors: usize, warnings: usize, infos: usize) -> String {
        if errors + warnings + infos == 0 {
            return self.colorize("no issues", ansi::GREEN);
        }
        format!(
            "{} errors, {} warnings, {} infos",
            self.colorize(&errors.to_string(), ansi::RED),
            self.colorize(&warnings.to_string(), ansi::YELLOW),
            self.colorize(&infos.to_string(), ansi::CYAN)
        )
    }

    fn format_checker(&self, checker: &Checker, output: &mut String) {
        let counts = self.format_counts(
            checker.issue_count_at(IssueLevel::Error),
            checker.issue_count_at(IssueLevel::Warning),
            checker.issue_count_at(IssueLevel::Info),
        );
        writeln!(
            output,
            "  {} [{}]: {counts}",
            checker.checker_id(),
            checker.status()
        )
        .ok();

        if self.verbose == 0 {
            return;
        }
        for issue in checker.issues() {
            let level = self.colorize(issue.level_str(), Self::level_color(issue.level()));
            write!(output, "    #{} {level}: {}", issue.issue_id(), issue.description()).ok();
            if issue.rule_uid().is_empty() {
                writeln!(output).ok();
            } else {
                writeln!(output, " ({})", issue.rule_uid()).ok();
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, results: &ResultContainer) -> Result<String> {
        let mut output = String::new();

        for bundle in results.checker_bundles() {
            writeln!(output, "{}", bundle.name()).ok();
            for checker in bundle.checkers() {
                self.format_checker(checker, &mut output);
            }
        }

        if results.has_checker_bundles() {
            writeln!(output).ok();
        }
        writeln!(
            output,
            "Summary: {} bundles, {} checkers, {}",
            results.checker_bundle_count(),
            results.checker_count(),
            self.format_counts(
                results.issue_count_at(IssueLevel::Error),
                results.issue_count_at(IssueLevel::Warning),
                results.issue_count_at(IssueLevel::Info),
            )
        )
        .ok();

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
