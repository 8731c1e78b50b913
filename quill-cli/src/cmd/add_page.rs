use anyhow::Result;
use clap::{ArgMatches, Command};
use quill_core::{Manifest, add_page, collect_page_request};

use crate::cmd::{add_common_args, prompter};
use crate::config::QuillConfig;

pub fn make_command() -> Command {
    add_common_args(Command::new("add-page"))
        .about("Create a page inside an existing topic and list it in the topic index")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = QuillConfig::load(args)?;
    let layout = config.layout();
    let materializer = config.materializer()?;

    // The topic prompt needs the manifest for its default and validation
    let manifest = Manifest::load(layout.manifest_path(), &layout.nav_key)?;

    let mut prompter = prompter();
    let request = collect_page_request(prompter.as_mut(), &manifest, config.slug_style)?;

    let outcome = add_page(&layout, &materializer, manifest, &request)?;

    println!();
    println!(
        "Created page '{}' at {} (entry {} of '{}')",
        request.name,
        outcome.path.display(),
        outcome.number,
        request.topic
    );

    Ok(())
}
