//! Logging utilities with colored module prefixes.
//!
//! A [`Logger`] is a small copyable value built once in `main` from CLI flags
//! and handed to every component that reports progress. Nothing here is
//! global, so tests can run components with [`Logger::silent`] in parallel.
//!
//! # Example
//!
//! ```ignore
//! let logger = Logger::new(verbose, false);
//! log!(logger, "scan"; "found {} svg assets", count);
//! debug!(logger, "hash"; "{} -> {}", path.display(), hash);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::io::{Write, stdout};
use std::time::Duration;

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!(logger, "module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $module:expr; $($arg:tt)*) => {{
        $logger.log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when verbose)
///
/// The message is not formatted at all unless verbose output is enabled.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $module:expr; $($arg:tt)*) => {{
        let logger = &$logger;
        if logger.is_verbose() {
            logger.log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Logger
// ============================================================================

/// Terminal logger handed to each pipeline component.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
    quiet: bool,
}

impl Logger {
    pub const fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// A logger that discards everything (tests, dry library use).
    pub const fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    #[inline]
    pub const fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Write `[module] message` to stdout.
    ///
    /// `error` and `warning` lines are still printed in quiet mode.
    pub fn log(&self, module: &str, message: &str) {
        let module_lower = module.to_ascii_lowercase();
        if self.quiet && !matches!(module_lower.as_str(), "error" | "warning") {
            return;
        }

        let prefix = colorize_prefix(module, &module_lower);
        let mut stdout = stdout().lock();
        writeln!(stdout, "{prefix} {message}").ok();
        stdout.flush().ok();
    }
}

/// Apply color to a module prefix based on module type
///
/// Plain text when stdout has no color support or `--color never` is set.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let style = match module_lower {
        "error" => Style::new().bright_red().bold(),
        "warning" => Style::new().yellow().bold(),
        "done" => Style::new().bright_green().bold(),
        "sdf" | "mips" => Style::new().bright_blue().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    let prefix = format!("[{module}]");
    prefix
        .if_supports_color(Stream::Stdout, |p| p.style(style))
        .to_string()
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Format an elapsed duration for per-asset timing lines (`1.25s`, `830ms`).
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}

/// `1 asset`, `3 assets`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_is_never_verbose() {
        assert!(!Logger::silent().is_verbose());
        assert!(!Logger::new(true, true).is_verbose());
        assert!(Logger::new(true, false).is_verbose());
    }

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("scan", "scan"), "[scan]");
        assert_eq!(colorize_prefix("Error", "error"), "[Error]");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(830)), "830ms");
        assert_eq!(format_elapsed(Duration::from_millis(1250)), "1.25s");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "asset"), "1 asset");
        assert_eq!(plural(0, "asset"), "0 assets");
        assert_eq!(plural(3, "file"), "3 files");
    }
}
