//! Steganography Online Codec command line client
//!
//! Hides a password encrypted message in an image, extracts it again, or
//! shows the license limits, by calling the Steganography Online Codec
//! Web API.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};

use steganography_online_codec::core::logging::init_logging;
use steganography_online_codec::core::report::{
    ReportContext, credits_line, edition_line, license_lines, limit_lines, outcome_line,
};
use steganography_online_codec::{CodecResponse, Command, Config, SteganographyOnlineCodec};

/// Steganography Online Codec client
///
/// Without an activation key the service runs in demo mode (8 character
/// passwords, 16 character messages, 50 kB images).
#[derive(Parser)]
#[command(name = "steganography-online-codec")]
#[command(version)]
#[command(about = "Hide encrypted messages in images using the Steganography Online Codec Web API")]
struct Cli {
    /// Configuration file (default: $CONFIG_PATH or ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Activation key (overrides the configuration and STEGANOGRAPHY_API_KEY)
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show license information and current limits
    Login,

    /// Encrypt a message and hide it in an image (output is always PNG)
    Encode {
        /// Input image (PNG, JPG, GIF, BMP, WBMP, GD2, AVIF, WEBP)
        #[arg(short, long)]
        input: PathBuf,

        /// Message to hide
        #[arg(short, long)]
        message: String,

        /// Encryption password
        #[arg(short, long)]
        password: String,

        /// Output PNG file, overwritten if it exists
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract a hidden message from a PNG image
    Decode {
        /// Encoded PNG image
        #[arg(short, long)]
        input: PathBuf,

        /// Decryption password
        #[arg(short, long)]
        password: String,

        /// Also write the message to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level);

    let codec = match SteganographyOnlineCodec::from_config(&config) {
        Ok(codec) => codec,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!(
        "Using endpoint {} (demo mode: {})",
        codec.endpoint(),
        codec.is_demo()
    );

    let response = match &cli.command {
        Commands::Login => {
            let response = codec.login().await;
            print_login(&response);
            response
        }
        Commands::Encode {
            input,
            message,
            password,
            output,
        } => {
            let response = codec.encode(input, message, password, output).await;
            let context = ReportContext {
                input: Some(input.as_path()),
                output: Some(output.as_path()),
            };
            print_outcome(Command::Encode, &response, &context);
            response
        }
        Commands::Decode {
            input,
            password,
            output,
        } => {
            let response = match output {
                Some(output) => codec.decode_to_file(input, password, output).await,
                None => codec.decode(input, password).await,
            };
            let context = ReportContext {
                input: Some(input.as_path()),
                output: output.as_deref(),
            };
            print_outcome(Command::Decode, &response, &context);
            response
        }
    };

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Configuration file, then environment, then command line flags
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config_with(cli, |name| std::env::var(name).ok(), Path::new("."))
}

fn load_config_with<F>(cli: &Cli, lookup: F, dir: &Path) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match cli.config {
        Some(ref path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env(&lookup);
            config
        }
        None => Config::from_env_with(&lookup, dir)?,
    };

    config.apply_overrides(cli.key.as_deref(), cli.log_level.as_deref());
    Ok(config)
}

fn print_login(response: &CodecResponse) {
    if !response.is_success() {
        println!(
            "{}",
            outcome_line(Command::Login, response, &ReportContext::default())
        );
        return;
    }

    for line in license_lines(response) {
        println!("{}", line);
    }
    if let Some(ref limits) = response.limits {
        for line in limit_lines(limits) {
            println!("{}", line);
        }
    }
}

fn print_outcome(command: Command, response: &CodecResponse, context: &ReportContext) {
    // client-side failures carry no license information
    if response.license.is_some() {
        println!("{}", edition_line(response));
    }

    println!("{}", outcome_line(command, response, context));

    if response.is_success() {
        if let Some(line) = credits_line(response) {
            println!("{}", line);
        }
    }
}
