//! DSCPL guide server binary.
//! Run with: cargo run --bin dscpl-server

use std::process::ExitCode;

use dscpl_guide::start_dscpl_guide;

fn main() -> ExitCode {
    start_dscpl_guide::run()
}
