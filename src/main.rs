// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments and hand them to `cli::run`.
// - Any error from a command is printed as a diagnostic line and the
//   process exits with a non-zero status. No operation is retried.

use clap::Parser;

use cgc_cli::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        eprintln!("[ERROR] {err:#}");
        std::process::exit(1);
    }
}
