use serde::{Deserialize, Serialize};

/// How a human-readable name is turned into a file or folder name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugStyle {
    /// Lowercase words joined by single hyphens.
    #[default]
    Kebab,
    /// Byte-for-byte the output of the old node scripts, quirks included.
    Legacy,
}

pub fn derive_slug(name: &str, style: SlugStyle) -> String {
    match style {
        SlugStyle::Kebab => kebab_slug(name),
        SlugStyle::Legacy => legacy_slug(name),
    }
}

/// Default file name offered for a new page.
pub fn default_page_filename(name: &str, style: SlugStyle) -> String {
    format!("{}.md", derive_slug(name, style))
}

fn kebab_slug(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }

        // camelCase boundary
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        prev_lower = c.is_lowercase() || c.is_numeric();
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

// Uppercase letters become "-" + lowercase. Only the first space and the
// first "--" are replaced, then the leading character is dropped whatever
// it is. Lowercase-initial names therefore lose their first letter.
fn legacy_slug(name: &str) -> String {
    let mut converted = String::with_capacity(name.len() * 2);
    for c in name.chars() {
        if is_legacy_uppercase(c) {
            converted.push('-');
            converted.extend(c.to_lowercase());
        } else {
            converted.push(c);
        }
    }

    let converted = converted.replacen(' ', "-", 1).replacen("--", "-", 1);
    converted.chars().skip(1).collect()
}

// Matches [A-ZÀ-ÖØ-Þ]
fn is_legacy_uppercase(c: char) -> bool {
    c.is_ascii_uppercase() || ('\u{C0}'..='\u{D6}').contains(&c) || ('\u{D8}'..='\u{DE}').contains(&c)
}
