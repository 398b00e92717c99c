use cel_engine::cli::{commands, Cli, Commands};
use cel_engine::EngineResult;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> EngineResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = commands::load_config(&cli.config);

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("cel_engine={}", log_level)
            .parse()
            .unwrap_or_else(|_| "cel_engine=info".parse().expect("fallback directive is valid")),
    );

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!("configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Eval {
            expression,
            context,
            identifier,
        } => {
            commands::eval(expression, context, identifier, &config)?;
        }
        Commands::Batch { file } => {
            commands::batch(file, &config)?;
        }
        Commands::Init { path } => {
            commands::init(path)?;
        }
        Commands::Version => {
            commands::version();
        }
    }

    Ok(())
}
