use clap::Parser;
use todo_cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    todo_cli::logging::init(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
