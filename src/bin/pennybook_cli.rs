use colored::Colorize;
use pennybook::{cli::run_cli, init};

fn main() {
    init();
    if let Err(err) = run_cli() {
        eprintln!("{} {}", "[x]".red().bold(), err);
        std::process::exit(1);
    }
}
