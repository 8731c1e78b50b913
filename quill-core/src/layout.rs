use std::path::{Path, PathBuf};

use crate::index::CONTENTS_MARKER;
use crate::materialize::INDEX_FILE;

/// Where things live inside a notes repository.
///
/// Every path except `root` is relative to `root`.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub manifest: PathBuf,
    /// Folder that holds the topic folders. Manifest paths are relative to it.
    pub notes: PathBuf,
    pub readme: PathBuf,
    pub global_index: PathBuf,
    pub contents_marker: String,
    pub nav_key: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest: PathBuf::from("mkdocs.yml"),
            notes: PathBuf::from("notes"),
            readme: PathBuf::from("README.md"),
            global_index: PathBuf::from("notes/index.md"),
            contents_marker: CONTENTS_MARKER.to_string(),
            nav_key: "pages".to_string(),
        }
    }
}

impl Layout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.readme)
    }

    pub fn global_index_path(&self) -> PathBuf {
        self.root.join(&self.global_index)
    }

    pub fn topic_dir(&self, folder: &str) -> PathBuf {
        self.root.join(&self.notes).join(folder)
    }

    pub fn topic_index_path(&self, folder: &str) -> PathBuf {
        self.topic_dir(folder).join(INDEX_FILE)
    }

    /// Manifest value of a topic's Home entry.
    pub fn home_path(folder: &str) -> String {
        format!("{folder}/{INDEX_FILE}")
    }

    /// Manifest value of a page entry.
    pub fn page_path(folder: &str, filename: &str) -> String {
        if folder.is_empty() {
            filename.to_string()
        } else {
            format!("{folder}/{filename}")
        }
    }

    /// Link to a topic index as seen from the readme.
    pub fn readme_link(&self, folder: &str) -> String {
        let notes = link_segment(&self.notes);
        if notes.is_empty() {
            format!("./{folder}/{INDEX_FILE}")
        } else {
            format!("./{notes}/{folder}/{INDEX_FILE}")
        }
    }

    /// Link to a topic index as seen from the global index.
    pub fn global_index_link(folder: &str) -> String {
        format!("./{folder}/{INDEX_FILE}")
    }

    /// Link to a page as seen from its topic index.
    pub fn topic_index_link(filename: &str) -> String {
        format!("./{filename}")
    }
}

fn link_segment(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/");
    let s = s.strip_prefix("./").unwrap_or(&s).trim_matches('/');
    if s == "." {
        return String::new();
    }
    s.to_string()
}
