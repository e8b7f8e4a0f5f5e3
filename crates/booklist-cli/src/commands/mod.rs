pub mod config;
pub mod session;
pub mod show;

use booklist_core::error::Result;
use booklist_core::{Booklist, Config};
use std::path::{Path, PathBuf};

/// Build the starting list: the `--seed` file, else the configured seed,
/// else an empty list. A blank `seed.path` counts as unset.
pub fn initial_booklist(seed: Option<&Path>, config: &Config) -> Result<Booklist> {
    let configured = config
        .seed
        .path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty());
    let path = seed
        .map(Path::to_path_buf)
        .or_else(|| configured.map(PathBuf::from));
    match path {
        Some(path) => {
            let list = Booklist::from_seed(&path)?;
            tracing::info!(path = %path.display(), books = list.total_count(), "seeded booklist");
            Ok(list)
        }
        None => Ok(Booklist::new()),
    }
}
