//! Stderr diagnostics shared by the loader, the compiler and the CLI.
//!
//! Fatal errors travel as `anyhow` errors and are printed once by `main`;
//! non-fatal notices go straight to stderr through `warn`.

use std::fmt::Display;

/// Prefix an error message so it reads the same wherever it surfaces.
pub fn error_message(msg: impl Display) -> String {
    format!("ERROR: {}", msg)
}

pub fn warn(msg: impl Display) {
    eprintln!("WARN: {}", msg);
}

/// Print a fatal error and its context chain.
pub fn report(err: &anyhow::Error) {
    eprintln!("{}", error_message(err));
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
}
