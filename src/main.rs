//! Patient gateway entry point
//!
//! Delegates everything to `cli::run`, prints errors to stderr and exits
//! non-zero on failure. A failed schema bootstrap ends up here before the
//! server has bound its port.

use patient_gateway::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
