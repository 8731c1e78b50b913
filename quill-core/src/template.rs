use std::path::Path;

use log::debug;
use tera::{Context, Tera};

use crate::error::Result;

pub const PAGE_TEMPLATE: &str = "page.md";
pub const TOPIC_INDEX_TEMPLATE: &str = "topic_index.md";

const PAGE: &str = "# {{ name }}\n\n{{ name }}.\n\n";
const TOPIC_INDEX: &str = "# {{ name }}\n\n{{ name }}.\n\nTopics:\n\n";

/// Renders the starter markdown written for new topics and pages.
pub struct StarterTemplates {
    tera: Tera,
}

impl Default for StarterTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StarterTemplates {
    pub fn builtin() -> Self {
        let mut tera = Tera::default();
        // Neither name ends in .html, so Tera never autoescapes them
        Self::add_builtins(&mut tera).expect("built-in starter templates parse");
        Self { tera }
    }

    /// Load `page.md` and `topic_index.md` from a directory. Whichever is
    /// missing falls back to the built-in one.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let glob = dir.as_ref().join("*.md");
        let mut tera = Tera::new(&glob.to_string_lossy())?;
        debug!(
            "Loaded starter templates: {:?}",
            tera.get_template_names().collect::<Vec<_>>()
        );

        Self::add_builtins(&mut tera)?;
        Ok(Self { tera })
    }

    fn add_builtins(tera: &mut Tera) -> Result<()> {
        Self::add_missing(tera, PAGE_TEMPLATE, PAGE)?;
        Self::add_missing(tera, TOPIC_INDEX_TEMPLATE, TOPIC_INDEX)
    }

    fn add_missing(tera: &mut Tera, name: &str, source: &str) -> Result<()> {
        if tera.get_template_names().any(|n| n == name) {
            return Ok(());
        }
        tera.add_raw_template(name, source)?;
        Ok(())
    }

    pub fn render_page(&self, name: &str) -> Result<String> {
        self.render(PAGE_TEMPLATE, name)
    }

    pub fn render_topic_index(&self, name: &str) -> Result<String> {
        self.render(TOPIC_INDEX_TEMPLATE, name)
    }

    fn render(&self, template: &str, name: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("name", name);
        Ok(self.tera.render(template, &context)?)
    }
}
