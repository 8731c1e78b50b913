use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::template::StarterTemplates;

pub const IMAGES_DIR: &str = "images";
pub const INDEX_FILE: &str = "index.md";

/// Creates topic folders and starter markdown files.
pub struct Materializer {
    templates: StarterTemplates,
    /// When false, refuse to replace an existing starter file.
    pub overwrite_if_exists: bool,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new(StarterTemplates::builtin())
    }
}

impl Materializer {
    pub fn new(templates: StarterTemplates) -> Self {
        Self {
            templates,
            overwrite_if_exists: true,
        }
    }

    pub fn overwrite_if_exists(mut self, overwrite: bool) -> Self {
        self.overwrite_if_exists = overwrite;
        self
    }

    /// Create `folder`, `folder/images` and `folder/index.md`.
    pub fn create_topic(&self, folder: &Path, name: &str) -> Result<()> {
        let index_path = folder.join(INDEX_FILE);
        self.check_target(&index_path)?;

        ensure_dir(folder)?;
        let content = self.templates.render_topic_index(name)?;
        write_file(&index_path, &content)?;
        ensure_dir(&folder.join(IMAGES_DIR))?;

        Ok(())
    }

    pub fn create_page(&self, path: &Path, name: &str) -> Result<()> {
        self.check_target(path)?;

        let content = self.templates.render_page(name)?;
        write_file(path, &content)
    }

    fn check_target(&self, path: &Path) -> Result<()> {
        if path.exists() {
            if !self.overwrite_if_exists {
                return Err(Error::conflict(format!(
                    "{} already exists and overwriting is disabled",
                    path.display()
                )));
            }
            debug!("Overwriting existing {}", path.display());
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir(path).map_err(|e| Error::io(path, e))?;
    info!("Created {}", path.display());
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
    info!("Wrote {}", path.display());
    Ok(())
}
