use std::path::Path;

use log::{debug, info};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Key of the reserved first page of every topic.
pub const HOME_KEY: &str = "Home";

#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub name: String,
    pub path: String,
}

/// One child of a topic.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicItem {
    Page(PageEntry),
    /// A nested section, a non-string key, a bare path. Written back
    /// untouched. `name` is the stringified key when there is one.
    Other { name: Option<String>, value: Value },
}

impl TopicItem {
    pub fn name(&self) -> Option<&str> {
        match self {
            TopicItem::Page(page) => Some(&page.name),
            TopicItem::Other { name, .. } => name.as_deref(),
        }
    }

    pub fn as_page(&self) -> Option<&PageEntry> {
        match self {
            TopicItem::Page(page) => Some(page),
            TopicItem::Other { .. } => None,
        }
    }

    fn from_value(value: Value) -> Self {
        if let Some((Value::String(name), Value::String(path))) = singleton(&value) {
            return TopicItem::Page(PageEntry {
                name: name.clone(),
                path: path.clone(),
            });
        }

        let name = singleton(&value).and_then(|(key, _)| key_name(key));
        TopicItem::Other { name, value }
    }

    fn to_value(&self) -> Value {
        match self {
            TopicItem::Page(page) => page_value(page),
            TopicItem::Other { value, .. } => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicEntry {
    pub name: String,
    pub items: Vec<TopicItem>,
    // Original YAML key, so numeric or boolean keys are written back as such
    key: Value,
}

impl TopicEntry {
    pub fn new(name: impl Into<String>, home_path: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: Value::String(name.clone()),
            name,
            items: vec![TopicItem::Page(PageEntry {
                name: HOME_KEY.to_string(),
                path: home_path.into(),
            })],
        }
    }

    /// Children that are plain `name: path` pages.
    pub fn pages(&self) -> impl Iterator<Item = &PageEntry> {
        self.items.iter().filter_map(TopicItem::as_page)
    }

    /// Folder of the topic relative to the notes root, taken from its Home
    /// entry. `None` when the first child is not Home.
    pub fn folder(&self) -> Option<&str> {
        let home = self
            .items
            .first()
            .and_then(TopicItem::as_page)
            .filter(|p| p.name == HOME_KEY)?;
        let folder = home.path.strip_suffix("index.md").unwrap_or(&home.path);
        Some(folder.trim_end_matches('/'))
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name() == Some(name))
    }

    /// Children other than Home.
    pub fn content_page_count(&self) -> usize {
        self.items.len().saturating_sub(1)
    }
}

/// One element of the navigation sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEntry {
    Page(PageEntry),
    Topic(TopicEntry),
    /// Anything we don't model. Written back untouched.
    Other(Value),
}

impl NavEntry {
    /// Stringified key of a singleton entry.
    pub fn name(&self) -> Option<String> {
        match self {
            NavEntry::Page(page) => Some(page.name.clone()),
            NavEntry::Topic(topic) => Some(topic.name.clone()),
            NavEntry::Other(value) => singleton(value).and_then(|(key, _)| key_name(key)),
        }
    }

    fn from_value(value: Value) -> Self {
        match Self::parse_named(&value) {
            Some(entry) => entry,
            None => NavEntry::Other(value),
        }
    }

    fn parse_named(value: &Value) -> Option<Self> {
        let (key, target) = singleton(value)?;

        match (key, target) {
            (Value::String(name), Value::String(path)) => Some(NavEntry::Page(PageEntry {
                name: name.clone(),
                path: path.clone(),
            })),
            (_, Value::Sequence(items)) => Some(NavEntry::Topic(TopicEntry {
                name: key_name(key)?,
                items: items.iter().cloned().map(TopicItem::from_value).collect(),
                key: key.clone(),
            })),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            NavEntry::Page(page) => page_value(page),
            NavEntry::Topic(topic) => {
                let items = topic.items.iter().map(TopicItem::to_value).collect();
                let mut map = Mapping::new();
                map.insert(topic.key.clone(), Value::Sequence(items));
                Value::Mapping(map)
            }
            NavEntry::Other(value) => value.clone(),
        }
    }
}

fn singleton(value: &Value) -> Option<(&Value, &Value)> {
    let map = value.as_mapping()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next()
}

/// Scalar keys as the name an operator would type. `2021` and `true` match
/// the strings "2021" and "true".
fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn page_value(page: &PageEntry) -> Value {
    let mut map = Mapping::new();
    map.insert(
        Value::String(page.name.clone()),
        Value::String(page.path.clone()),
    );
    Value::Mapping(map)
}

/// The navigation manifest (`mkdocs.yml`).
///
/// Only the sequence under the nav key is modelled. Every other top-level
/// key is kept as parsed and written back in its original position.
#[derive(Debug, Clone)]
pub struct Manifest {
    document: Mapping,
    nav_key: String,
    entries: Vec<NavEntry>,
}

impl Manifest {
    pub fn load<P: AsRef<Path>>(path: P, nav_key: &str) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!("Loaded manifest {}", path.display());
        Self::parse_from(path, &data, nav_key)
    }

    pub fn parse(data: &str, nav_key: &str) -> Result<Self> {
        Self::parse_from(Path::new("<manifest>"), data, nav_key)
    }

    fn parse_from(path: &Path, data: &str, nav_key: &str) -> Result<Self> {
        let root: Value =
            serde_yaml::from_str(data).map_err(|e| Error::parse(path, e.to_string()))?;

        let Value::Mapping(document) = root else {
            return Err(Error::parse(path, "top level is not a mapping"));
        };

        let entries = match document.get(nav_key) {
            Some(Value::Sequence(items)) => {
                items.iter().cloned().map(NavEntry::from_value).collect()
            }
            Some(_) => {
                return Err(Error::parse(path, format!("`{nav_key}` is not a sequence")));
            }
            None => {
                return Err(Error::parse(path, format!("missing `{nav_key}` sequence")));
            }
        };

        Ok(Self {
            document,
            nav_key: nav_key.to_string(),
            entries,
        })
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn topics(&self) -> impl Iterator<Item = &TopicEntry> {
        self.entries.iter().filter_map(|e| match e {
            NavEntry::Topic(topic) => Some(topic),
            _ => None,
        })
    }

    pub fn find_topic(&self, name: &str) -> Option<&TopicEntry> {
        self.topics().find(|t| t.name == name)
    }

    fn find_topic_mut(&mut self, name: &str) -> Option<&mut TopicEntry> {
        self.entries.iter_mut().find_map(|e| match e {
            NavEntry::Topic(topic) if topic.name == name => Some(topic),
            _ => None,
        })
    }

    /// Topic offered as the default answer when adding a page.
    pub fn suggested_topic(&self) -> Option<&str> {
        self.topics().next().map(|t| t.name.as_str())
    }

    /// Insert a topic right after the pinned first entry.
    pub fn add_topic(&mut self, name: &str, home_path: &str) -> Result<()> {
        let taken = self
            .entries
            .iter()
            .any(|e| e.name().as_deref() == Some(name));
        if taken {
            return Err(Error::conflict(format!(
                "A topic named '{name}' already exists."
            )));
        }

        let position = self.entries.len().min(1);
        self.entries
            .insert(position, NavEntry::Topic(TopicEntry::new(name, home_path)));
        debug!("Inserted topic '{name}' at position {position}");

        Ok(())
    }

    /// Append a page to a topic. Returns the number of non-Home pages the
    /// topic holds afterwards.
    pub fn add_page(&mut self, topic: &str, page: &str, path: &str) -> Result<usize> {
        let entry = self
            .find_topic_mut(topic)
            .ok_or_else(|| Error::not_found(format!("Invalid topic name: {topic}")))?;

        if entry.has_page(page) {
            return Err(Error::conflict(
                "A page with the same name already exists in this topic.",
            ));
        }

        entry.items.push(TopicItem::Page(PageEntry {
            name: page.to_string(),
            path: path.to_string(),
        }));
        debug!("Appended page '{page}' to topic '{topic}'");

        Ok(entry.content_page_count())
    }

    pub fn to_yaml(&self) -> Result<String> {
        let mut document = self.document.clone();
        let nav = self.entries.iter().map(NavEntry::to_value).collect();
        document.insert(Value::String(self.nav_key.clone()), Value::Sequence(nav));

        Ok(serde_yaml::to_string(&Value::Mapping(document))?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| Error::io(path, e))?;
        info!("Updated {}", path.display());
        Ok(())
    }

    pub fn nav_key(&self) -> &str {
        &self.nav_key
    }
}

/// Resolve the folder of `topic`, failing when the topic has no Home entry.
pub fn topic_folder(topic: &TopicEntry) -> Result<String> {
    topic.folder().map(str::to_string).ok_or_else(|| {
        Error::not_found(format!("Topic '{}' has no Home entry", topic.name))
    })
}
