use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "zipweather";

/// File name of the default series cache inside the platform cache directory.
pub const CACHE_FILE_NAME: &str = "series_cache.csv";

/// Default location of the series cache file, e.g.
/// `~/.cache/zipweather/series_cache.csv` on Linux.
pub fn default_cache_file() -> io::Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine system cache directory",
            )
        })
}

pub async fn ensure_parent_dir_exists(path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    match tokio::fs::metadata(parent).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("cache path exists but is not a directory: {}", parent.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(parent).await
        }
        Err(e) => Err(e),
    }
}
