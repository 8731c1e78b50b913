pub mod error;
pub mod index;
pub mod layout;
pub mod manifest;
pub mod materialize;
pub mod prompt;
pub mod slug;
pub mod template;
pub mod workflow;

// Re-export main types
pub use error::{Error, Result};
pub use layout::Layout;
pub use manifest::{Manifest, NavEntry, PageEntry, TopicEntry, TopicItem};
pub use materialize::Materializer;
pub use prompt::{ConsolePrompter, LinePrompter, Prompter};
pub use slug::{SlugStyle, derive_slug};
pub use template::StarterTemplates;
pub use workflow::{
    PageOutcome, PageRequest, TopicOutcome, TopicRequest, add_page, add_topic, collect_page_request,
    collect_topic_request,
};
