//! Static files served next to the API, loaded once at startup

use crate::error::AssetError;
use axum::body::Bytes;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";
pub const CHARACTER_FILE: &str = "Character.png";

/// Served at `/` when `index.html` cannot be read.
pub const FALLBACK_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>Sus Journal</title></head>\
<body><h1>Sus Journal</h1><p>The UI page is missing. Game state is available at \
<a href=\"/api/gamestate\">/api/gamestate</a>.</p></body></html>\n";

/// Cached asset bytes, cheap to clone into each request.
#[derive(Debug, Clone)]
pub struct Assets {
    pub index_html: Bytes,
    /// Empty when the image could not be loaded.
    pub character_png: Bytes,
}

impl Assets {
    /// Reads both assets from `dir`. Missing files are logged and replaced.
    pub fn load(dir: &Path) -> Self {
        let index_html = match read_asset(&dir.join(INDEX_FILE)) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("{}; serving built-in page instead", e);
                Bytes::from_static(FALLBACK_PAGE.as_bytes())
            }
        };

        let character_png = match read_asset(&dir.join(CHARACTER_FILE)) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("{}; image requests will get 404", e);
                Bytes::new()
            }
        };

        info!(
            "Assets loaded from {} ({} bytes page, {} bytes image)",
            dir.display(),
            index_html.len(),
            character_png.len()
        );

        Self {
            index_html,
            character_png,
        }
    }

    /// Assets as they look when nothing could be loaded.
    pub fn fallback() -> Self {
        Self {
            index_html: Bytes::from_static(FALLBACK_PAGE.as_bytes()),
            character_png: Bytes::new(),
        }
    }
}

fn read_asset(path: &Path) -> Result<Bytes, AssetError> {
    std::fs::read(path).map(Bytes::from).map_err(|source| AssetError::Read {
        path: PathBuf::from(path),
        source,
    })
}
