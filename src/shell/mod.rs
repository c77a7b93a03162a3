pub mod command;
pub mod render;
pub mod session;

pub use command::Command;
pub use session::Session;

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::Result;
use crate::models::{ModelId, PipelineResult, ReasoningMode};
use crate::pipeline::PromptPipeline;

/// Runs a typed query against the active conversation.
///
/// On failure the conversation keeps its previous contents.
pub async fn send(
    session: &mut Session,
    pipeline: &PromptPipeline,
    query: &str,
) -> Result<PipelineResult> {
    let request = session.query_request(query)?;
    let result = pipeline.run(&request).await?;
    session.apply_result(&result);
    Ok(result)
}

/// Generates a report for the selected file.
pub async fn generate_report(
    session: &mut Session,
    pipeline: &PromptPipeline,
) -> Result<PipelineResult> {
    let request = session.report_request()?;
    match pipeline.run(&request).await {
        Ok(result) => {
            session.apply_report(&result);
            Ok(result)
        }
        Err(e) => {
            if matches!(request.mode, ReasoningMode::SinglePath | ReasoningMode::MultiPath) {
                session.record_report_failure();
            }
            Err(e)
        }
    }
}

/// Re-runs the last query, but only once the active conversation holds a result.
pub async fn regenerate(
    session: &mut Session,
    pipeline: &PromptPipeline,
) -> Result<Option<PipelineResult>> {
    let Some(query) = session.last_query().map(str::to_string) else {
        return Ok(None);
    };
    if !session.active().has_result() {
        return Ok(None);
    }
    send(session, pipeline, &query).await.map(Some)
}

pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Shell {
    session: Session,
    pipeline: PromptPipeline,
}

impl Shell {
    pub fn new(session: Session, pipeline: PromptPipeline) -> Self {
        Self { session, pipeline }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub async fn execute(&mut self, command: Command) -> Result<Outcome> {
        let session = &mut self.session;

        let message = match command {
            Command::Empty => String::new(),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => command::HELP.to_string(),
            Command::Query(query) => {
                let result = send(session, &self.pipeline, &query).await?;
                render::format_text(&result)
            }
            Command::Report => {
                let result = generate_report(session, &self.pipeline).await?;
                render::format_text(&result)
            }
            Command::Regenerate => match regenerate(session, &self.pipeline).await? {
                Some(result) => render::format_text(&result),
                None => "Nothing to regenerate yet.".to_string(),
            },
            Command::New => format!("Started conversation {}", session.new_conversation().name),
            Command::Delete => {
                session.delete_active()?;
                format!("Active conversation: {}", session.active().name)
            }
            Command::Rename(name) => {
                session.rename_active(&name)?;
                format!("Renamed to {}", session.active().name)
            }
            Command::Switch(name) => {
                session.switch_conversation(&name)?;
                format!("Active conversation: {}", session.active().name)
            }
            Command::List => {
                let active = session.active().name.clone();
                session
                    .conversations()
                    .iter()
                    .map(|c| {
                        let marker = if c.name == active { "*" } else { " " };
                        format!("{} {}", marker, c.name)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Model(name) => {
                session.model = ModelId::resolve(&name)?;
                format!("Model: {}", session.model)
            }
            Command::Models => render::format_models(&session.model),
            Command::Mode(mode) => {
                session.mode = mode.parse()?;
                format!("Reasoning mode: {}", session.mode)
            }
            Command::Task(task) => {
                session.task = task.parse()?;
                format!("Task type: {}", session.task)
            }
            Command::Upload(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let bytes = tokio::fs::read(&path).await?;
                let chars = session.upload(&name, &bytes)?.chars().count();
                format!("File {} uploaded and processed successfully! ({} chars)", name, chars)
            }
            Command::Files => {
                let selected = session.selected_file().map(str::to_string);
                let listing: Vec<String> = session
                    .files()
                    .map(|f| {
                        let marker = if Some(f) == selected.as_deref() { "*" } else { " " };
                        format!("{} {}", marker, f)
                    })
                    .collect();
                if listing.is_empty() {
                    "No files uploaded.".to_string()
                } else {
                    listing.join("\n")
                }
            }
            Command::Select(name) => {
                session.select_file(&name)?;
                format!("Selected file: {}", name)
            }
            Command::System(prompt) => {
                session.set_system_prompt(prompt);
                "System prompt updated.".to_string()
            }
            Command::Show => render::format_conversation(session.active()),
        };

        Ok(Outcome::Continue(message))
    }

    /// Reads commands line by line until `:quit` or end of input.
    ///
    /// Command failures are reported to `out` and do not end the loop.
    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        write!(out, "> ")?;
        out.flush()?;

        while let Some(line) = lines.next_line().await? {
            let outcome = match Command::parse(&line) {
                Ok(command) => self.execute(command).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue(message)) if !message.is_empty() => {
                    writeln!(out, "{}", message)?
                }
                Ok(Outcome::Continue(_)) => {}
                Err(e) => writeln!(out, "Error: {}", e)?,
            }

            write!(out, "> ")?;
            out.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::error::Error;
    use crate::llm::testing::ScriptedProvider;
    use crate::models::TaskType;
    use std::sync::Arc;

    fn shell(replies: Vec<Result<String>>) -> (Shell, Arc<ScriptedProvider>) {
        let llm = Arc::new(ScriptedProvider::new(replies));
        let pipeline = PromptPipeline::new(
            llm.clone(),
            PipelineConfig {
                show_progress: false,
                ..PipelineConfig::default()
            },
        );
        (Shell::new(Session::new(), pipeline), llm)
    }

    #[tokio::test]
    async fn test_failed_send_leaves_conversation_unchanged() {
        let (mut shell, _) = shell(vec![
            Ok("first\n\nanswer".into()),
            Err(Error::Api { status: 500, message: "down".into() }),
        ]);

        shell.execute(Command::Query("q1".into())).await.unwrap();
        assert_eq!(shell.session().active().summary, "first");

        assert!(shell.execute(Command::Query("q2".into())).await.is_err());
        assert_eq!(shell.session().active().summary, "first");
        assert_eq!(shell.session().active().details, "answer");
    }

    #[tokio::test]
    async fn test_report_failure_records_fixed_text() {
        let (mut shell, _) = shell(vec![Err(Error::RateLimited(None))]);
        shell.session_mut().add_file("notes.txt", "body".into());

        assert!(shell.execute(Command::Report).await.is_err());
        assert_eq!(shell.session().active().summary, session::REPORT_FAILED_SUMMARY);
        assert_eq!(shell.session().active().details, session::REPORT_FAILED_DETAILS);
    }

    #[tokio::test]
    async fn test_report_with_empty_details_records_failure() {
        let (mut shell, _) = shell(vec![Ok("Summary only\n\n".into())]);
        shell.session_mut().add_file("notes.txt", "body".into());

        assert!(matches!(
            shell.execute(Command::Report).await,
            Err(Error::MalformedResponse(_))
        ));
        assert_eq!(shell.session().active().summary, session::REPORT_FAILED_SUMMARY);
        assert_eq!(shell.session().active().details, session::REPORT_FAILED_DETAILS);
    }

    #[tokio::test]
    async fn test_send_with_empty_summary_keeps_conversation() {
        let (mut shell, _) = shell(vec![
            Ok("first\n\nanswer".into()),
            Ok("\n\nThe answer body".into()),
        ]);

        shell.execute(Command::Query("q1".into())).await.unwrap();
        assert!(shell.execute(Command::Query("q2".into())).await.is_err());
        assert_eq!(shell.session().active().summary, "first");
        assert_eq!(shell.session().active().details, "answer");
    }

    #[tokio::test]
    async fn test_enhanced_report_only_replaces_summary() {
        let (mut shell, _) = shell(vec![
            Ok("earlier\n\nkept details".into()),
            Ok("enhanced report".into()),
        ]);
        shell.execute(Command::Query("q".into())).await.unwrap();
        shell.session_mut().add_file("notes.txt", "body".into());
        shell.session_mut().mode = ReasoningMode::EnhancedSystemPrompt;

        shell.execute(Command::Report).await.unwrap();
        assert_eq!(shell.session().active().summary, "enhanced report");
        assert_eq!(shell.session().active().details, "kept details");
    }

    #[tokio::test]
    async fn test_regenerate_needs_prior_result() {
        let (mut shell, llm) = shell(vec![Ok("one\n\ntwo".into()), Ok("three\n\nfour".into())]);

        assert!(matches!(
            shell.execute(Command::Regenerate).await.unwrap(),
            Outcome::Continue(ref m) if m == "Nothing to regenerate yet."
        ));

        shell.execute(Command::Query("same question".into())).await.unwrap();
        shell.execute(Command::Regenerate).await.unwrap();

        let calls = llm.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].messages[1].content, calls[1].messages[1].content);
        assert_eq!(shell.session().active().summary, "three");
    }

    #[tokio::test]
    async fn test_settings_commands() {
        let (mut shell, _) = shell(vec![]);

        shell.execute(Command::Model("llama3-8b-8192".into())).await.unwrap();
        shell.execute(Command::Mode("multi-path".into())).await.unwrap();
        shell.execute(Command::Task("code-debugging".into())).await.unwrap();

        let session = shell.session();
        assert_eq!(session.model.display_name(), "Llama 3 8B");
        assert_eq!(session.mode, ReasoningMode::MultiPath);
        assert_eq!(session.task, TaskType::CodeDebugging);

        assert!(matches!(
            shell.execute(Command::Model("gpt-4".into())).await,
            Err(Error::UnsupportedModel(_))
        ));
    }

    #[tokio::test]
    async fn test_run_reports_errors_and_quits() {
        let (mut shell, llm) = shell(vec![Ok("only\n\nreply".into())]);
        let input: &[u8] = b":mode nonsense\nhello\n:quit\nnever sent\n";
        let mut out = Vec::new();

        shell.run(input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Error: Unknown reasoning mode: nonsense"));
        assert!(printed.contains("Response:\nonly"));
        assert_eq!(llm.calls().len(), 1);
    }
}
