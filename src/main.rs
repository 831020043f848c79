//! twimg-dump - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use twimg_dump::{
    api::TwitterApi,
    cli::Args,
    config::{parse_screen_name, validate_config, Config},
    download::{crawl_timeline, CrawlState, HttpDownloader},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_crawl_stats, print_error, print_info,
        print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

/// Map an error to the process exit code.
fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::MissingConfig(_)
        | Error::Template(_)
        | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
        Error::Api(_)
        | Error::Authentication(_)
        | Error::AccountNotFound(_)
        | Error::RateLimited
        | Error::Protocol(_)
        | Error::MissingCursor(_)
        | Error::UnknownMediaType(_)
        | Error::CursorCycle(_)
        | Error::Http(_)
        | Error::Json(_) => exit_codes::API_ERROR,
        Error::Download(_) | Error::Io(_) => exit_codes::DOWNLOAD_ERROR,
        Error::UrlParse(_) => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    if !args.quiet {
        print_banner();
    }

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) if path.exists() => Config::load(&path)?,
            _ => Config::default(),
        },
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    let template = validate_config(&config)?;
    let screen_name = parse_screen_name(&args.screen_name)?;

    print_config_summary(
        &screen_name,
        &config.output_directory().display().to_string(),
        template.as_str(),
    );

    // Initialize API client
    let api = TwitterApi::new(
        config.client.bearer_token.clone(),
        &config.client.user_agent,
        config.options.page_size,
    )?;

    print_info(&format!("Looking up @{}...", screen_name));
    let user_id = api.user_id(&screen_name).await?;
    print_info(&format!("Found account {}", user_id));

    let downloader = HttpDownloader::new(
        &config.client.user_agent,
        config.options.skip_existing,
        config.options.show_downloads,
    )?;

    let mut state = CrawlState::new(screen_name, user_id, args.cursor.clone());
    let result = crawl_timeline(&api, &downloader, &config, &template, &mut state).await;

    print_crawl_stats(&state);

    if result.is_err() {
        if let Some(cursor) = &state.cursor {
            print_warning(&format!(
                "Crawl stopped early. Resume with: --cursor {}",
                cursor
            ));
        }
    }

    result
}
