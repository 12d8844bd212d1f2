//! Terminal output with colored module prefixes.
//!
//! ```ignore
//! log!("colorkey"; "saved {}", path.display());
//! debug!("filter"; "{} colors", n);
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{stderr, stdout, Write},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn set_quiet(q: bool) {
    QUIET.store(q, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message only when `--verbose` is set
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// `error` goes to stderr and ignores `--quiet`; everything else to stdout.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    if module.eq_ignore_ascii_case("error") {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        return;
    }

    if QUIET.load(Ordering::SeqCst) {
        return;
    }

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold().to_string(),
        "colorkey" => prefix.bright_green().bold().to_string(),
        _ => prefix.bright_blue().bold().to_string(),
    }
}
