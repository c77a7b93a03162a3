use std::path::PathBuf;

use crate::error::{Error, Result};

pub const HELP: &str = r#"Commands:
  <text>              send a query with the current mode
  :new                start a new conversation
  :delete             delete the active conversation
  :rename <name>      rename the active conversation
  :switch <name>      switch to another conversation
  :list               list conversations
  :model <name|id>    select a model
  :models             list supported models
  :mode <mode>        single-path | multi-path | advance-steps | enhanced-system-prompt
  :task <task>        research | code-debugging | content-generation | strategic-planning
  :upload <path>      extract a .txt, .pdf or .docx file and select it
  :files              list uploaded files
  :select <file>      select an uploaded file as context
  :report             generate a report for the selected file
  :regen              re-run the last query
  :system <prompt>    replace the active conversation's system prompt
  :show               print the active conversation
  :help               show this help
  :quit               exit"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    New,
    Delete,
    Rename(String),
    Switch(String),
    List,
    Model(String),
    Models,
    Mode(String),
    Task(String),
    Upload(PathBuf),
    Files,
    Select(String),
    Report,
    Regenerate,
    System(String),
    Show,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Query(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let required = |command: &'static str| -> Result<String> {
            if arg.is_empty() {
                Err(Error::MissingArgument(command))
            } else {
                Ok(arg.to_string())
            }
        };

        Ok(match name {
            "new" => Command::New,
            "delete" => Command::Delete,
            "rename" => Command::Rename(required(":rename")?),
            "switch" => Command::Switch(required(":switch")?),
            "list" => Command::List,
            "model" => Command::Model(required(":model")?),
            "models" => Command::Models,
            "mode" => Command::Mode(required(":mode")?),
            "task" => Command::Task(required(":task")?),
            "upload" => Command::Upload(PathBuf::from(required(":upload")?)),
            "files" => Command::Files,
            "select" => Command::Select(required(":select")?),
            "report" => Command::Report,
            "regen" | "regenerate" => Command::Regenerate,
            "system" => Command::System(required(":system")?),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(Error::UnknownOption {
                    kind: "command",
                    value: format!(":{}", other),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_query() {
        assert_eq!(
            Command::parse("  what is a lifetime?  ").unwrap(),
            Command::Query("what is a lifetime?".into())
        );
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            Command::parse(":mode advance-steps").unwrap(),
            Command::Mode("advance-steps".into())
        );
        assert_eq!(
            Command::parse(":model Llama 3.1 8B").unwrap(),
            Command::Model("Llama 3.1 8B".into())
        );
        assert_eq!(
            Command::parse(":upload ./docs/brief.docx").unwrap(),
            Command::Upload(PathBuf::from("./docs/brief.docx"))
        );
        assert_eq!(Command::parse(":regen").unwrap(), Command::Regenerate);
        assert_eq!(Command::parse(":q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_missing_argument() {
        assert!(matches!(
            Command::parse(":rename"),
            Err(Error::MissingArgument(":rename"))
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            Command::parse(":frobnicate now"),
            Err(Error::UnknownOption { kind: "command", value }) if value == ":frobnicate"
        ));
    }
}
