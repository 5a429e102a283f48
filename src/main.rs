use clap::Parser;
use portal_forms::cli::commands::{cmd_config, cmd_submit, cmd_validate};
use portal_forms::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { form, fields } => {
            let valid = cmd_validate(&config, &form, &fields)?;
            if !valid {
                std::process::exit(1);
            }
        }
        Commands::Submit {
            form,
            fields,
            timeout_ms,
            allow_invalid,
        } => {
            let accepted =
                cmd_submit(&config, &form, &fields, timeout_ms, allow_invalid, cli.verbose).await?;
            if !accepted {
                std::process::exit(1);
            }
        }
        Commands::Config => {
            print!("{}", cmd_config(&config)?);
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v, -vv, -vvv raise the default level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("portal_forms={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
