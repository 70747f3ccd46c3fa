use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gapwise-cli", version, about = "Gapwise CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schedule from task/gap/event files
    Plan(commands::plan::PlanArgs),
    /// Run the pipeline on seeded sample data
    Demo(commands::demo::DemoArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Demo(args) => commands::demo::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
