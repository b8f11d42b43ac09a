use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use photostamp::{Compressor, Config, blob_to_data_url, read_data_url, startup_checks};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Global options that apply to all commands
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resize an image, stamp it with the current time and re-encode it as JPEG
    Compress {
        /// Image file to compress
        input: PathBuf,

        /// Where to write the JPEG (defaults to <input>.stamped.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result as a data URL instead of writing a file
        #[arg(long)]
        data_url: bool,
    },

    /// Print any file as a base64 data URL
    DataUrl {
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set up logging first
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so data URLs on stdout stay pipeable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Compress {
            input,
            output,
            data_url,
        } => run_compress(&cli.config, input, output, data_url).await,
        Commands::DataUrl { input } => {
            println!("{}", read_data_url(&input).await?);
            Ok(())
        }
    }
}

async fn run_compress(
    config_path: &Path,
    input: PathBuf,
    output: Option<PathBuf>,
    data_url: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    info!("Configuration loaded from: {:?}", config_path);

    if let Err(errors) = startup_checks::perform_startup_checks(&config) {
        for error in &errors {
            tracing::warn!("Startup check failed: {}", error);
        }
        tracing::warn!("Continuing without a guaranteed watermark");
    }

    let compressor = Compressor::new(config);
    let blob = compressor.compress(&input).await?;

    if data_url {
        println!("{}", blob_to_data_url(&blob));
        return Ok(());
    }

    let output = output.unwrap_or_else(|| default_output_path(&input));
    tokio::fs::write(&output, &blob.bytes).await?;
    info!("Wrote {} bytes to {:?}", blob.len(), output);

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}.stamped.jpg", stem))
}
