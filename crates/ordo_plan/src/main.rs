//! Prints the load order for a plugin manifest.
//!
//! # Usage
//!
//! ```bash
//! ordo-plan <manifest.json> [--strict]
//! ```
//!
//! `--strict` rejects required plugins that the manifest does not declare,
//! even if the manifest itself does not set `"strict": true`. Set `RUST_LOG`
//! (e.g. `RUST_LOG=ordo_resolve=debug`) to see each resolution round.

use ordo_plan::{Manifest, TracingConfig};
use std::process::ExitCode;

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "command-line entry point"
)]
fn main() -> ExitCode {
    TracingConfig::new().init();

    let mut path = None;
    let mut strict = false;
    for arg in std::env::args().skip(1) {
        if arg == "--strict" {
            strict = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            eprintln!("Usage: ordo-plan <manifest.json> [--strict]");
            return ExitCode::FAILURE;
        }
    }

    let Some(path) = path else {
        eprintln!("Usage: ordo-plan <manifest.json> [--strict]");
        eprintln!("Example: ordo-plan plugins.json --strict");
        return ExitCode::FAILURE;
    };

    let plan = Manifest::load(&path).and_then(|mut manifest| {
        manifest.strict |= strict;
        manifest.plan()
    });

    match plan {
        Ok(plan) => {
            print!("{plan}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
