use clap::Parser;
use tracing_subscriber::EnvFilter;
use shopmission::cli;
use shopmission::errors::ShopError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: cli::Cli) -> Result<(), ShopError> {
    let config = cli::resolve_config(cli.config.as_deref(), cli.catalog.as_deref()).await?;

    match cli.command {
        cli::Commands::Play(args) => cli::play::handle_play(args, config).await,
        cli::Commands::Render(args) => cli::render::handle_render(args, config).await,
        cli::Commands::Validate => cli::validate::handle_validate(config).await,
    }
}
