use anyhow::Result;
use clap::{ArgMatches, Command};
use quill_core::{Manifest, add_topic, collect_topic_request};

use crate::cmd::{add_common_args, prompter};
use crate::config::QuillConfig;

pub fn make_command() -> Command {
    add_common_args(Command::new("add-topic"))
        .about("Create a topic folder with an index page and register it in the manifest")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = QuillConfig::load(args)?;
    let layout = config.layout();
    let materializer = config.materializer()?;

    let mut prompter = prompter();
    let request = collect_topic_request(prompter.as_mut(), config.slug_style)?;

    let manifest = Manifest::load(layout.manifest_path(), &layout.nav_key)?;
    let outcome = add_topic(&layout, &materializer, manifest, &request)?;

    println!();
    println!("Created topic '{}' in {}", request.name, outcome.folder.display());

    Ok(())
}
