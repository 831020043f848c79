//! Download path resolution.

use std::path::{Path, PathBuf};

use crate::fs::template::OutputTemplate;
use crate::media::TweetMedia;

/// Get the download path for a media item.
pub fn get_download_path(
    output_directory: &Path,
    template: &OutputTemplate,
    item: &TweetMedia,
) -> PathBuf {
    output_directory.join(template.render(item))
}

/// Path of the temporary file a download is streamed into.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
