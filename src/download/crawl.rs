//! Media timeline crawl loop.

use crate::config::Config;
use crate::download::media::Downloader;
use crate::download::state::CrawlState;
use crate::error::Result;
use crate::fs::{get_download_path, OutputTemplate};
use crate::media::{extract_media, TweetMedia};
use crate::timeline::{resolve_page, TimelineSource};

/// Walk an account's media timeline from the state's cursor towards older
/// content, downloading every media item on the way.
///
/// Pages are processed strictly one after another. The crawl ends on the first
/// page without tweets, or when `max_pages` pages were fetched. Output paths
/// are rendered from `template` under the configured output directory.
pub async fn crawl_timeline<S, D>(
    source: &S,
    downloader: &D,
    config: &Config,
    template: &OutputTemplate,
    state: &mut CrawlState,
) -> Result<()>
where
    S: TimelineSource + ?Sized,
    D: Downloader + ?Sized,
{
    let output_directory = config.output_directory();

    tracing::info!("Crawling media timeline of @{}...", state.screen_name);

    loop {
        if let Some(max_pages) = config.options.max_pages {
            if state.pages_fetched >= max_pages {
                tracing::info!("Reached page limit ({}), stopping", max_pages);
                break;
            }
        }

        tracing::info!(
            "Current cursor: {}",
            state.cursor.as_deref().unwrap_or("(none)")
        );

        let payload = source
            .fetch_page(&state.user_id, state.cursor.as_deref())
            .await?;
        state.pages_fetched += 1;

        let page = resolve_page(&payload)?;
        state.tweets_seen += page.tweets.len() as u64;

        let mut items: Vec<TweetMedia> = Vec::new();
        for tweet in &page.tweets {
            items.extend(extract_media(&state.user_id, &state.screen_name, *tweet)?);
        }
        state.media_found += items.len() as u64;

        tracing::info!(
            "Page {}: {} tweets, {} media",
            state.pages_fetched,
            page.tweets.len(),
            items.len()
        );
        tracing::info!("Next cursor: {}", page.cursor_bottom);

        for item in &items {
            let destination = get_download_path(&output_directory, template, item);

            match downloader.download(&item.url, &destination).await? {
                Some(path) => {
                    state.record_download(item.kind);
                    if config.options.show_downloads {
                        tracing::info!("Saved {} {}", item.kind, path.display());
                    } else {
                        tracing::debug!("Saved {} {}", item.kind, path.display());
                    }
                }
                None => {
                    state.increment_skipped();
                    tracing::debug!("Skipped existing {}", destination.display());
                }
            }
        }

        if page.tweets.is_empty() {
            tracing::info!("Reached the end of the timeline");
            break;
        }

        state.advance(page.cursor_bottom)?;
    }

    Ok(())
}
