//! news-digest: one search, one email, then exit.

use news_digest::{config, DigestError, Pipeline};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("news-digest {}", news_digest::VERSION);
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
    }

    // .env may set RUST_LOG
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error in digest job: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DigestError> {
    let settings = config::load()?;
    info!(
        "Starting news-digest v{} for query {:?}",
        news_digest::VERSION,
        settings.search.query()
    );

    let mut pipeline = Pipeline::from_settings(settings).map_err(|e| {
        error!("Failed to build HTTP client: {:#}", e);
        DigestError::SearchFailed
    })?;
    pipeline.run().await?;

    Ok(())
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
news-digest v{}
Search a news API for a topic and email the result links.

USAGE:
    news-digest [OPTIONS]

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    SEARCH_QUERY           Search query (required)
    TAVILY_API_KEY         Search API key (required)
    TAVILY_URL             Search endpoint [default: https://api.tavily.com/search]
    SEARCH_TOPIC           Topic [default: news]
    SEARCH_DEPTH           Depth [default: advanced]
    SEARCH_DAYS            Recency window in days [default: 7]
    MAX_RESULTS            Result cap [default: 10]
    INCLUDE_ANSWER         Ask for a generated answer [default: false]
    RESEND_API_KEY         Email API key (required)
    RESEND_URL             Email endpoint [default: https://api.resend.com/emails]
    EMAIL_FROM             Sender address (required)
    EMAIL_TO               Recipient address (required)
    EMAIL_SUBJECT          Subject line (required)
    DIGEST_ESCAPE_HTML     HTML-escape query and URLs [default: false]
    DIGEST_REQUEST_TIMEOUT Request timeout in seconds [default: none]
    DIGEST_SETTINGS_PATH   Path to a YAML settings file
    RUST_LOG               Log filter [default: info]
"#,
        news_digest::VERSION
    );
}
