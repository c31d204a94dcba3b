use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Pre-rendered map artifact
// ---------------------------------------------------------------------------

/// The choropleth map HTML, read as opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum MapArtifact {
    Loaded { path: PathBuf, html: String },
    /// File absent or unreadable; the UI shows a placeholder.
    Missing { path: PathBuf },
}

impl MapArtifact {
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(html) => {
                log::info!("Loaded map artifact {} ({} bytes)", path.display(), html.len());
                MapArtifact::Loaded {
                    path: path.to_path_buf(),
                    html,
                }
            }
            Err(e) => {
                log::warn!("Map artifact {} unavailable: {e}", path.display());
                MapArtifact::Missing {
                    path: path.to_path_buf(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            MapArtifact::Loaded { path, .. } | MapArtifact::Missing { path } => path,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, MapArtifact::Loaded { .. })
    }

    /// Contents of the `<title>` element, if any.
    pub fn title(&self) -> Option<&str> {
        let MapArtifact::Loaded { html, .. } = self else {
            return None;
        };
        let lower = html.to_ascii_lowercase();
        let open = lower.find("<title>")? + "<title>".len();
        let close = open + lower[open..].find("</title>")?;
        let title = html[open..close].trim();
        (!title.is_empty()).then_some(title)
    }

    /// `file://` URL for opening the artifact in a browser.
    pub fn file_url(&self) -> Option<String> {
        if !self.is_loaded() {
            return None;
        }
        let abs = std::fs::canonicalize(self.path()).ok()?;
        Some(format!("file://{}", abs.display()))
    }
}
