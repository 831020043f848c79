//! Statistics reporting.

use console::style;

use crate::download::CrawlState;

/// Print statistics for a crawl.
pub fn print_crawl_stats(state: &CrawlState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for @{}:", state.screen_name)).bold()
    );
    println!("  Pages:    {}", state.pages_fetched);
    println!("  Tweets:   {}", state.tweets_seen);
    println!("  Photos:   {}", state.photo_count);
    println!("  Videos:   {}", state.video_count);
    println!("  GIFs:     {}", state.gif_count);
    if state.skipped_count > 0 {
        println!("  Skipped:  {} (already on disk)", style(state.skipped_count).yellow());
    }
    println!(
        "  Total:    {} of {} downloaded",
        style(state.total_downloaded()).green(),
        state.media_found
    );
}
