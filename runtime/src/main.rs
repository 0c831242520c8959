use anyhow::{Context, Result};
use clap::Parser;
use hn_front::cli::{doctor, top_cmd, Cli, Commands};
use hn_front::ExtractorConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Output mode is read back through the environment by the cli::output
    // helpers; set it before the runtime starts any threads.
    if cli.json {
        std::env::set_var("HN_FRONT_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("HN_FRONT_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("HN_FRONT_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("HN_FRONT_NO_COLOR", "1");
    }

    init_tracing(cli.verbose, cli.quiet);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| ExtractorConfig::default_path().filter(|p| p.exists()));
    let mut config = ExtractorConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Doctor) => {
            tokio::task::spawn_blocking(move || doctor::run(&config, config_path.as_deref()))
                .await
                .context("doctor task failed")?
        }
        Some(Commands::Top(args)) => {
            args.apply(&mut config)?;
            top_cmd::run(config).await
        }
        None => {
            cli.top.apply(&mut config)?;
            top_cmd::run(config).await
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "hn_front=debug"
    } else if quiet {
        "hn_front=error"
    } else {
        "hn_front=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
