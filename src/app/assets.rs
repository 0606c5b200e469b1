//! Scratch directory for rendered views.
//!
//! Every image is written out and the copy on disk is what gets displayed, so
//! the directory always mirrors the screen.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{BellError, BellStateSelector, Result};
use crate::visual::{Image, PanelContent};

/// Directory that receives one text file per view and Bell state.
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    /// Uses `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| BellError::AssetLoadFailure {
            path: dir.clone(),
            message: format!("cannot create asset directory: {}", e),
        })?;
        Ok(Self { dir })
    }

    /// Directory the assets live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<view>_<selector>.txt`
    pub fn path_for(&self, content: PanelContent, selector: BellStateSelector) -> PathBuf {
        self.dir.join(format!("{}_{}.txt", content.name(), selector.name()))
    }

    /// Writes `image` and returns the image read back from disk.
    pub fn store(&self, content: PanelContent, selector: BellStateSelector, image: &Image) -> Result<Image> {
        let path = self.path_for(content, selector);
        fs::write(&path, &image.data).map_err(|e| BellError::AssetLoadFailure {
            path: path.clone(),
            message: format!("write failed: {}", e),
        })?;
        let loaded = Self::load(&path)?;
        debug!(path = %path.display(), width = loaded.width, height = loaded.height, "asset stored");
        Ok(loaded)
    }

    /// Reads a text raster.
    pub fn load(path: &Path) -> Result<Image> {
        let bytes = fs::read(path).map_err(|e| BellError::AssetLoadFailure {
            path: path.to_path_buf(),
            message: format!("read failed: {}", e),
        })?;
        let text = String::from_utf8(bytes).map_err(|e| BellError::AssetLoadFailure {
            path: path.to_path_buf(),
            message: format!("not a text raster: {}", e),
        })?;
        Ok(Image::from_text(&text))
    }
}
