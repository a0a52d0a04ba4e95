use anyhow::{Context, Result};
use clap::Parser;
use laprank::{analyzer::LapTimeAnalyzer, cli::Cli};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; logs go to stderr so stdout stays the report
///
/// `--debug` and `--quiet` add a level on top of `RUST_LOG`. Without them,
/// `RUST_LOG` decides alone and INFO is used when it is unset.
fn init_tracing(debug: bool, quiet: bool) {
    let level = if debug {
        Some(tracing::Level::TRACE)
    } else if quiet {
        Some(tracing::Level::WARN)
    } else {
        None
    };

    let filter = match level {
        Some(level) => EnvFilter::from_default_env().add_directive(level.into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug, args.quiet);

    let config = args.resolve_config().context("Failed to load configuration")?;
    config.validate()?;

    let mut analyzer = LapTimeAnalyzer::new(&config.input).with_delimiter(config.delimiter_byte()?);
    let report = analyzer
        .run_pipeline(&config.targets())
        .with_context(|| format!("Failed to analyze {}", config.input.display()))?;

    if !args.no_report {
        print!("{}", report);
    }

    Ok(())
}
