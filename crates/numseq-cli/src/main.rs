use clap::{Parser, Subcommand};

mod commands;
mod config;
mod writer;

use commands::generate::{self, GenerateArgs};

#[derive(Parser, Debug)]
#[command(name = "numseq", about = "Handwritten digit sequence image generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one digit sequence image and save it to disk.
    Generate(GenerateArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate(args) => generate::run(&args),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
