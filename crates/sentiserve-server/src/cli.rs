use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentiserve")]
#[command(author, version, about = "Train and serve a binary sentiment classifier")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the model and write the artifact plus metrics
    Train {
        /// Optional CSV dataset with text,label columns; the built-in
        /// corpus is used when the file does not exist
        #[arg(long, default_value = "data/sentiment.csv")]
        data: PathBuf,

        /// Output directory for the artifact and metrics
        #[arg(long, default_value = "model", env = "SENTISERVE_MODEL_DIR")]
        model_dir: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Predict the sentiment of one text and print the JSON result
    Predict {
        /// Text to analyze
        text: String,

        /// Directory containing the trained artifact
        #[arg(long, default_value = "model", env = "SENTISERVE_MODEL_DIR")]
        model_dir: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Start the prediction HTTP server
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Directory containing the trained artifact
        #[arg(long, default_value = "model", env = "SENTISERVE_MODEL_DIR")]
        model_dir: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
