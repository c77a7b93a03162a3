use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use groqsearch::models::{ModelId, PipelineResult};
use groqsearch::shell::{self, render};
use groqsearch::{
    CompletionService, Config, GroqProvider, PipelineConfig, PromptPipeline, RetryConfig,
    RetryingProvider, Session, Shell,
};

#[derive(Parser, Debug)]
#[command(name = "groqsearch")]
#[command(version = "0.1.0")]
#[command(about = "Search and summarize with Groq-hosted models using prompt-chaining reasoning modes")]
struct Args {
    /// Model display name or backend id
    #[arg(short, long, default_value = "Mixtral 8x7B")]
    model: String,

    /// Reasoning mode (single-path, multi-path, advance-steps, enhanced-system-prompt)
    #[arg(long, default_value = "single-path")]
    mode: String,

    /// Multi-path task type (research, code-debugging, content-generation, strategic-planning)
    #[arg(long, default_value = "research")]
    task: String,

    /// Replace the default system prompt
    #[arg(long)]
    system_prompt: Option<String>,

    /// Upload a .txt, .pdf or .docx file; the last one is selected as context
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// Send a single query and exit
    #[arg(short, long, conflicts_with = "report")]
    query: Option<String>,

    /// Generate a report for the selected file and exit
    #[arg(long)]
    report: bool,

    /// Output format for one-shot runs (text, json, markdown)
    #[arg(long, default_value = "text")]
    format: String,

    /// Output file for one-shot runs (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hide progress spinners
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("groqsearch=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // The credential is checked before anything touches the network.
    let config = Config::from_env()?;

    let groq = GroqProvider::from_config(&config)?;
    let llm: Arc<dyn CompletionService> = if config.max_retries > 0 {
        Arc::new(RetryingProvider::new(Arc::new(groq), RetryConfig::from(&config)))
    } else {
        Arc::new(groq)
    };

    let pipeline = PromptPipeline::new(
        llm,
        PipelineConfig {
            show_progress: !args.no_progress,
            ..PipelineConfig::default()
        },
    );

    let mut session = Session::new();
    session.model = ModelId::resolve(&args.model)?;
    session.mode = args.mode.parse()?;
    session.task = args.task.parse()?;
    if let Some(ref prompt) = args.system_prompt {
        session.set_system_prompt(prompt.clone());
    }

    for path in &args.files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = tokio::fs::read(path).await?;
        session.upload(&name, &bytes)?;
        tracing::info!("File {} uploaded and processed successfully", name);
    }

    if let Some(ref query) = args.query {
        let result = shell::send(&mut session, &pipeline, query).await?;
        return output_result(&result, &args);
    }

    if args.report {
        let result = shell::generate_report(&mut session, &pipeline).await?;
        return output_result(&result, &args);
    }

    tracing::info!(
        "Interactive session with {} in {} mode",
        session.model,
        session.mode
    );
    println!("{}", shell::command::HELP);

    let mut shell = Shell::new(session, pipeline);
    shell
        .run(BufReader::new(tokio::io::stdin()), std::io::stdout())
        .await?;

    Ok(())
}

fn output_result(result: &PipelineResult, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => render::format_json(result)?,
        "markdown" => render::format_markdown(result),
        _ => render::format_text(result),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}
