use clap::{Arg, ArgAction, Command};
use quill_core::{ConsolePrompter, LinePrompter, Prompter};
use std::io::IsTerminal;

pub mod add_page;
pub mod add_topic;

/// Arguments shared by both tools. Neither is needed for a normal run.
pub fn add_common_args(command: Command) -> Command {
    command
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Root of the notes repository")
                .default_value("."),
        )
        .arg(
            Arg::new("no-overwrite")
                .long("no-overwrite")
                .help("Fail instead of replacing an existing starter file")
                .action(ArgAction::SetTrue),
        )
}

/// Terminal prompts when attached to a TTY, plain line prompts otherwise
pub fn prompter() -> Box<dyn Prompter> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        Box::new(ConsolePrompter)
    } else {
        log::debug!("stdin is not a terminal, using line prompts");
        Box::new(LinePrompter::new(stdin.lock(), std::io::stdout()))
    }
}
