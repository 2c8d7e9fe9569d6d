//! `gorodplus` (gp) - civic issue board
//!
//! Report city problems, vote on them, and see where they are.
//! Everything lives in memory for the length of one invocation or shell session.

use gorodplus::cli::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
