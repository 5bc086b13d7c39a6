use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use url::Url;

mod config;
mod error;
mod media;
mod pipeline;
mod twitter;
mod utils;

use config::{EnvSource, Settings};
use error::GifterError;
use media::{Converter, FfmpegConverter};
use pipeline::Pipeline;
use twitter::TwitterClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a tweet's video into a gif", long_about = None)]
struct Args {
    /// Status id or full status URL
    status: String,

    /// Where to write the converted image
    output: PathBuf,

    #[arg(long, env = "TWITTER_API_ROOT", default_value = config::DEFAULT_API_ROOT, hide = true)]
    api_root: Url,

    /// Timeout in seconds for each HTTP request and the encoder run
    #[arg(long, env = "GIFTER_TIMEOUT", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Encoder executable, invoked as `<encoder> -y -i <input> <output>`
    #[arg(long, env = "GIFTER_ENCODER", default_value = config::DEFAULT_ENCODER)]
    encoder: PathBuf,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // stdout is reserved for the resulting path
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

async fn run(args: Args) -> Result<PathBuf> {
    let status_id = utils::parse_status_id(&args.status)?;
    let credentials = config::load_credentials(&EnvSource)?;

    let settings = Settings::new(args.api_root, args.timeout, args.encoder);

    let converter = FfmpegConverter::new(&settings.encoder, settings.timeout);
    if !converter.test_availability().await {
        info!("Continuing anyway, conversion will likely fail");
    }

    let client = TwitterClient::new(&settings)?;
    let output = Pipeline::new(client, converter)
        .run(&credentials, &status_id, &args.output)
        .await
        .with_context(|| format!("Failed to convert status {}", status_id))?;

    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_format);

    info!("Starting twit-gifter...");

    match run(args).await {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            let code = e
                .downcast_ref::<GifterError>()
                .map_or(1, GifterError::exit_code);
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["twit-gifter", "20", "out.gif"]).unwrap();
        assert_eq!(args.status, "20");
        assert_eq!(args.output, PathBuf::from("out.gif"));
        assert_eq!(args.api_root.as_str(), config::DEFAULT_API_ROOT);
    }

    #[test]
    fn test_args_reject_bad_api_root() {
        let result =
            Args::try_parse_from(["twit-gifter", "--api-root", "not a url", "20", "out.gif"]);
        assert!(result.is_err());
    }
}
