use std::fs::File;
use std::io::{self, BufRead, BufReader};

use imagedb::Session;
use imagedb::config::SessionConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagedb=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration from environment variables
    let config = match SessionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let input: Box<dyn BufRead> = match &config.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                tracing::error!("Failed to open {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    tracing::info!(
        "Starting session: input={}, max_line_length={}",
        config
            .input
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string()),
        config.max_line_length
    );

    let mut session = Session::new(&config);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    match session.run(input, &mut stdout, &mut stderr) {
        Ok(summary) => {
            tracing::info!(
                "Session finished: commands={}, invalid={}, records={}",
                summary.commands,
                summary.invalid,
                summary.records
            );
        }
        Err(e) => {
            tracing::error!("Session failed: {e}");
            std::process::exit(1);
        }
    }
}
