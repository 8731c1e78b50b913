//! The add-topic and add-page pipelines.
//!
//! Each run is collect input, derive slug, mutate the manifest, write the
//! starter file, save the manifest, then update the index files. Nothing is
//! rolled back: if a later step fails the earlier writes stay on disk.

use std::path::PathBuf;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::index::{append_after_marker, append_line, bullet_entry, ordered_entry};
use crate::layout::Layout;
use crate::manifest::{Manifest, topic_folder};
use crate::materialize::Materializer;
use crate::prompt::{Prompter, ask_required};
use crate::slug::{SlugStyle, default_page_filename, derive_slug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRequest {
    pub name: String,
    /// Folder name under the notes root.
    pub folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub topic: String,
    pub name: String,
    /// File name inside the topic folder, used verbatim.
    pub filename: String,
}

#[derive(Debug)]
pub struct TopicOutcome {
    pub folder: PathBuf,
    pub index: PathBuf,
}

#[derive(Debug)]
pub struct PageOutcome {
    pub path: PathBuf,
    /// Position of the page among the topic's non-Home pages, from 1.
    pub number: usize,
}

pub fn collect_topic_request<P: Prompter + ?Sized>(
    prompter: &mut P,
    style: SlugStyle,
) -> Result<TopicRequest> {
    let name = ask_required(prompter, "Topic name", "topic name")?;
    let slug = derive_slug(&name, style);
    let folder = ask_with_slug_default(prompter, "Topic folder", "topic folder", slug)?;

    Ok(TopicRequest { name, folder })
}

/// Prompt for a page, validating the topic and page name against the
/// manifest as soon as each is known.
pub fn collect_page_request<P: Prompter + ?Sized>(
    prompter: &mut P,
    manifest: &Manifest,
    style: SlugStyle,
) -> Result<PageRequest> {
    let topic = match manifest.suggested_topic() {
        Some(suggested) => prompter.ask("Topic name", Some(suggested))?,
        None => ask_required(prompter, "Topic name", "topic name")?,
    };
    let entry = manifest
        .find_topic(&topic)
        .ok_or_else(|| Error::not_found(format!("Invalid topic name: {topic}")))?;

    let name = ask_required(prompter, "Page name", "page name")?;
    if entry.has_page(&name) {
        return Err(Error::conflict(
            "A page with the same name already exists in this topic.",
        ));
    }

    let filename = if derive_slug(&name, style).is_empty() {
        ask_required(prompter, "Page file name", "page file name")?
    } else {
        let default = default_page_filename(&name, style);
        prompter.ask("Page file name", Some(&default))?
    };

    Ok(PageRequest {
        topic,
        name,
        filename,
    })
}

fn ask_with_slug_default<P: Prompter + ?Sized>(
    prompter: &mut P,
    question: &str,
    field: &str,
    slug: String,
) -> Result<String> {
    if slug.is_empty() {
        debug!("No usable slug for {field}, asking without a default");
        return ask_required(prompter, question, field);
    }
    prompter.ask(question, Some(&slug))
}

pub fn add_topic(
    layout: &Layout,
    materializer: &Materializer,
    mut manifest: Manifest,
    request: &TopicRequest,
) -> Result<TopicOutcome> {
    let TopicRequest { name, folder } = request;

    manifest.add_topic(name, &Layout::home_path(folder))?;

    let folder_path = layout.topic_dir(folder);
    materializer.create_topic(&folder_path, name)?;

    manifest.save(layout.manifest_path())?;

    append_after_marker(
        &layout.global_index_path(),
        &layout.contents_marker,
        &bullet_entry(name, &Layout::global_index_link(folder)),
    )?;
    append_after_marker(
        &layout.readme_path(),
        &layout.contents_marker,
        &bullet_entry(name, &layout.readme_link(folder)),
    )?;

    info!("Added topic '{name}' in {}", folder_path.display());

    Ok(TopicOutcome {
        index: layout.topic_index_path(folder),
        folder: folder_path,
    })
}

pub fn add_page(
    layout: &Layout,
    materializer: &Materializer,
    mut manifest: Manifest,
    request: &PageRequest,
) -> Result<PageOutcome> {
    let PageRequest {
        topic,
        name,
        filename,
    } = request;

    let entry = manifest
        .find_topic(topic)
        .ok_or_else(|| Error::not_found(format!("Invalid topic name: {topic}")))?;
    let folder = topic_folder(entry)?;

    let number = manifest.add_page(topic, name, &Layout::page_path(&folder, filename))?;

    let page_path = layout.topic_dir(&folder).join(filename);
    materializer.create_page(&page_path, name)?;

    manifest.save(layout.manifest_path())?;

    append_line(
        &layout.topic_index_path(&folder),
        &ordered_entry(number, name, &Layout::topic_index_link(filename)),
    )?;

    info!("Added page '{name}' to topic '{topic}' as entry {number}");

    Ok(PageOutcome {
        path: page_path,
        number,
    })
}
