use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use sentiserve_model::{train, Predictor, TrainerConfig};
use sentiserve_server::cli::{Cli, Commands};
use sentiserve_server::server::run_server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            model_dir,
            verbose,
        } => {
            init_logging(verbose);

            let config = TrainerConfig {
                data_path: data,
                model_dir,
                ..TrainerConfig::default()
            };
            let outcome = train(&config)?;

            println!("Saved model -> {}", outcome.model_path.display());
            println!("Accuracy: {:.3}", outcome.accuracy);
            println!("{}", outcome.report);
        }

        Commands::Predict {
            text,
            model_dir,
            verbose,
        } => {
            init_logging(verbose);

            let config = TrainerConfig::with_model_dir(model_dir);
            let predictor = Predictor::new(config.model_path());
            let prediction = predictor.predict(&text)?;
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }

        Commands::Serve {
            port,
            address,
            model_dir,
            verbose,
        } => {
            init_logging(verbose);

            let config = TrainerConfig::with_model_dir(model_dir);
            let predictor = Arc::new(Predictor::new(config.model_path()));
            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            run_server(predictor, addr).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "sentiserve_server=debug,sentiserve_model=debug,tower_http=debug"
    } else {
        "sentiserve_server=info,sentiserve_model=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
