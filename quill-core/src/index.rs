//! Keeps the markdown index files in step with the manifest.
//!
//! Global index and readme entries go right below the contents marker.
//! Topic index entries are appended to the end of the file.

use std::path::Path;

use log::info;

use crate::error::{Error, Result};

pub const CONTENTS_MARKER: &str = "## Contents";

pub fn bullet_entry(name: &str, link: &str) -> String {
    format!("- [{name}]({link})")
}

pub fn ordered_entry(number: usize, name: &str, link: &str) -> String {
    format!("{number}. [{name}]({link})")
}

/// Insert `line` on its own line directly below the first line containing
/// `marker`.
pub fn insert_after_marker(text: &str, marker: &str, line: &str) -> Result<String> {
    let start = text
        .find(marker)
        .ok_or_else(|| Error::not_found(format!("Contents marker '{marker}' not found")))?;

    let mut out = String::with_capacity(text.len() + line.len() + 2);
    match text[start..].find('\n') {
        Some(offset) => {
            let split = start + offset + 1;
            out.push_str(&text[..split]);
            out.push_str(line);
            out.push('\n');
            out.push_str(&text[split..]);
        }
        None => {
            out.push_str(text);
            out.push('\n');
            out.push_str(line);
            out.push('\n');
        }
    }

    Ok(out)
}

pub fn append_after_marker(path: &Path, marker: &str, line: &str) -> Result<()> {
    let text = read(path)?;
    let updated = insert_after_marker(&text, marker, line).map_err(|e| match e {
        Error::NotFound(msg) => Error::not_found(format!("{msg} in {}", path.display())),
        other => other,
    })?;
    write(path, &updated)
}

/// Append `line` and a newline to the end of the file.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut text = read(path)?;
    text.push_str(line);
    text.push('\n');
    write(path, &text)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn write(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| Error::io(path, e))?;
    info!("Updated {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inserts_below_marker_line() {
        let out = insert_after_marker("## Contents\nfoo\n", CONTENTS_MARKER, "- [x](./x.md)").unwrap();
        assert_eq!(out, "## Contents\n- [x](./x.md)\nfoo\n");
    }

    #[test]
    fn test_newest_entry_goes_first() {
        let text = "# Notes\n\n## Contents\n- [a](./a/index.md)\n";
        let out = insert_after_marker(text, CONTENTS_MARKER, "- [b](./b/index.md)").unwrap();
        assert_eq!(out, "# Notes\n\n## Contents\n- [b](./b/index.md)\n- [a](./a/index.md)\n");
    }

    #[test]
    fn test_only_first_marker_is_used() {
        let text = "## Contents\n\n## Contents\n";
        let out = insert_after_marker(text, CONTENTS_MARKER, "- x").unwrap();
        assert_eq!(out, "## Contents\n- x\n\n## Contents\n");
    }

    #[test]
    fn test_marker_on_last_line() {
        let out = insert_after_marker("# Notes\n## Contents", CONTENTS_MARKER, "- x").unwrap();
        assert_eq!(out, "# Notes\n## Contents\n- x\n");
    }

    #[test]
    fn test_missing_marker_is_not_found() {
        let err = insert_after_marker("# Notes\n", CONTENTS_MARKER, "- x").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_append_after_marker_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Readme\n").unwrap();

        let err = append_after_marker(&path, CONTENTS_MARKER, "- x").unwrap_err();
        assert!(err.to_string().contains("README.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Readme\n");
    }

    #[test]
    fn test_append_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.md");
        std::fs::write(&path, "# Rust\n\nRust.\n\nTopics:\n\n").unwrap();

        append_line(&path, &ordered_entry(1, "Traits", "./traits.md")).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Rust\n\nRust.\n\nTopics:\n\n1. [Traits](./traits.md)\n"
        );
    }
}
