use std::path::Path;

use elecdist::io::Format;

/// Input format from a file extension.
pub fn input(path: &Path) -> Option<Format> {
    path.extension()?.to_str()?.parse().ok()
}
