use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where a resolved image is stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub path: PathBuf,
    pub already_exists: bool,
}

/// File name for an image, `<channel>-<post_id>.<extension>`.
///
/// Path separators are replaced so the name always stays inside the output root.
pub fn file_name(channel: &str, post_id: &str, extension: &str) -> String {
    let clean = |s: &str| s.replace(['/', '\\'], "_");
    format!("{}-{}.{}", clean(channel), clean(post_id), clean(extension))
}

/// Compute the save target and make sure its directory exists.
///
/// An existing regular file at the target path counts as a cache hit.
pub fn name_target(
    channel: &str,
    post_id: &str,
    extension: &str,
    output_root: &Path,
) -> io::Result<SaveTarget> {
    fs::create_dir_all(output_root)?;
    let path = output_root.join(file_name(channel, post_id, extension));
    let already_exists = path.is_file();
    Ok(SaveTarget {
        path,
        already_exists,
    })
}
