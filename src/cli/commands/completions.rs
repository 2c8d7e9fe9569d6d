//! Completions command implementation.

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

/// Write the completion script for the requested shell to stdout.
pub fn execute(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "gp", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        clap_complete::generate(Shell::Bash, &mut Cli::command(), "gp", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("vote"));
        assert!(script.contains("submit"));
    }
}
