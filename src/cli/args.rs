//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Twitter media timeline downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "twimg-dump",
    version,
    about = "Download every photo, video and GIF from a Twitter account's media timeline",
    long_about = "Walks the media timeline of a public account from newest to oldest and saves \
                  the original-quality file of every attachment.\n\n\
                  If a run is interrupted, pass the last printed cursor to --cursor to resume."
)]
pub struct Args {
    /// Screen name of the account, with or without a leading '@'.
    pub screen_name: String,

    /// Resume from this timeline cursor instead of the newest tweet.
    #[arg(short, long)]
    pub cursor: Option<String>,

    /// Base directory for downloads [default: current directory].
    #[arg(short = 'o', long = "output")]
    pub output_directory: Option<PathBuf>,

    /// Relative output path template, e.g. "{username}/{tweet_id}_{index}.{ext}".
    #[arg(short, long)]
    pub template: Option<String>,

    /// Path to configuration file [default: platform config directory].
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip media whose output file already exists.
    #[arg(long)]
    pub skip_existing: bool,

    /// Stop after this many timeline pages.
    #[arg(long)]
    pub max_pages: Option<u64>,

    /// Bearer token of the web client.
    #[arg(long = "bearer-token", env = "TWIMG_DUMP_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "TWIMG_DUMP_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        // Override client settings if provided
        if let Some(token) = &self.bearer_token {
            config.client.bearer_token = token.clone();
        }

        if let Some(user_agent) = &self.user_agent {
            config.client.user_agent = user_agent.clone();
        }

        // Override options if provided
        if let Some(dir) = &self.output_directory {
            config.options.output_directory = Some(dir.clone());
        }

        if let Some(template) = &self.template {
            config.options.output_template = template.clone();
        }

        if let Some(max_pages) = self.max_pages {
            config.options.max_pages = Some(max_pages);
        }

        // Boolean flags (only override if set to non-default)
        if self.skip_existing {
            config.options.skip_existing = true;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}
