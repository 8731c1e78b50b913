use std::io::{BufRead, Write};

use crate::error::{Error, Result};

/// Asks the operator a question and returns the answer.
///
/// An empty answer resolves to `default` when one is given.
pub trait Prompter {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String>;
}

/// Ask for a field that has no default and must not be empty.
pub fn ask_required<P: Prompter + ?Sized>(
    prompter: &mut P,
    question: &str,
    field: &str,
) -> Result<String> {
    let answer = prompter.ask(question, None)?;
    if answer.is_empty() {
        return Err(Error::validation(field));
    }
    Ok(answer)
}

/// Interactive terminal prompts.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        let mut prompt = inquire::Text::new(question);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }

        prompt.prompt().map_err(|e| Error::Prompt(e.to_string()))
    }
}

/// Plain line-based prompts over any reader and writer.
///
/// Used when stdin is not a terminal. End of input counts as an empty
/// answer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        let label = match default {
            Some(default) => format!("{question} ({default}): "),
            None => format!("{question}: "),
        };
        let io_err = |e: std::io::Error| Error::Prompt(e.to_string());

        self.output.write_all(label.as_bytes()).map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(io_err)?;
        let answer = line.trim_end_matches(['\n', '\r']);

        match (answer.is_empty(), default) {
            (true, Some(default)) => Ok(default.to_string()),
            _ => Ok(answer.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_answer_is_literal() {
        let mut p = prompter("My Topic\n");
        assert_eq!(p.ask("Topic name", None).unwrap(), "My Topic");
    }

    #[test]
    fn test_empty_answer_takes_default() {
        let mut p = prompter("\r\n");
        assert_eq!(p.ask("Topic folder", Some("my-topic")).unwrap(), "my-topic");
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "Topic folder (my-topic): ");
    }

    #[test]
    fn test_end_of_input_is_empty() {
        let mut p = prompter("");
        assert_eq!(p.ask("Page name", None).unwrap(), "");
        assert_eq!(p.ask("Page file name", Some("x.md")).unwrap(), "x.md");
    }

    #[test]
    fn test_required_rejects_empty() {
        let mut p = prompter("\n");
        let err = ask_required(&mut p, "Page name", "page name").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Please insert a non-empty page name");
    }

    #[test]
    fn test_questions_follow_each_other() {
        let mut p = prompter("Rust\n\n");
        assert_eq!(ask_required(&mut p, "Topic name", "topic name").unwrap(), "Rust");
        assert_eq!(p.ask("Topic folder", Some("rust")).unwrap(), "rust");
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "Topic name: Topic folder (rust): ");
    }
}
