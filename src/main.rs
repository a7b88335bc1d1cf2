use clap::Parser;
use tagsift::cli::commands::{Cli, Commands};
use tagsift::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let config_dir = cli.config_dir.clone().unwrap_or_else(|| ".".into());

    match cli.command {
        None => {
            // No subcommand → launch the interactive panel
            let Some(file) = cli.file else {
                eprintln!("usage: tsf <file> (or `tsf --help`)");
                std::process::exit(2);
            };
            if let Err(e) = tagsift::tui::run(&file, &config_dir) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::List(args)) => {
            if let Err(e) = handlers::cmd_list(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
