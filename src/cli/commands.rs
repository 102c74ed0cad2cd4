use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "shopmission", version, about = "Budgeted shopping missions with a PNG purchase report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file (defaults to ./shopmission.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Product catalog CSV, overriding the configuration
    #[arg(long, global = true)]
    pub catalog: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive shopping mission
    Play(PlayArgs),
    /// Render a report from a recorded order without the interactive session
    Render(RenderArgs),
    /// Validate the configuration and product catalog
    Validate,
}

#[derive(Args, Clone)]
pub struct PlayArgs {
    /// Resume the last saved session
    #[arg(long)]
    pub resume: bool,

    /// Skip the splash screen
    #[arg(long)]
    pub no_splash: bool,
}

#[derive(Args, Clone)]
pub struct RenderArgs {
    /// Order file (YAML or JSON): mission, items, reasons
    #[arg(short, long)]
    pub order: String,

    /// Output file or directory (defaults to the configured output directory)
    #[arg(short = 'O', long)]
    pub output: Option<String>,
}
