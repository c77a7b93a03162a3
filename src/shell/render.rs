use crate::error::Result;
use crate::models::{Artifacts, Conversation, ModelId, PipelineResult};

pub fn format_text(result: &PipelineResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== {} ===\n\n", result.mode));

    match &result.artifacts {
        Artifacts::Report { summary, details } => {
            output.push_str("Response:\n");
            output.push_str(summary);
            output.push_str("\n\nDetails:\n");
            output.push_str(details);
        }
        Artifacts::Steps(steps) => {
            output.push_str("Analysis Summary:\n");
            output.push_str(&steps.analysis_summary);
            output.push_str("\n\n");
            output.push_str(&steps.details());
        }
        Artifacts::Response { text } => {
            output.push_str("Response:\n");
            output.push_str(text);
        }
    }

    output.push('\n');
    output
}

pub fn format_markdown(result: &PipelineResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", result.mode));

    match &result.artifacts {
        Artifacts::Report { summary, details } => {
            output.push_str(&format!("## Summary\n\n{}\n\n", summary));
            output.push_str(&format!("## Details\n\n{}\n", details));
        }
        Artifacts::Steps(steps) => {
            output.push_str(&format!("## Analysis Summary\n\n{}\n\n", steps.analysis_summary));
            output.push_str(&format!("## Improved Prompt\n\n{}\n\n", steps.improved_prompt));
            output.push_str(&format!(
                "## Generated Response\n\n{}\n\n",
                steps.generated_response
            ));
            output.push_str(&format!("## Review Feedback\n\n{}\n", steps.review_feedback));
        }
        Artifacts::Response { text } => {
            output.push_str(&format!("## Response\n\n{}\n", text));
        }
    }

    output
}

pub fn format_json(result: &PipelineResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn format_conversation(conversation: &Conversation) -> String {
    format!(
        "=== {} ===\n\nSystem Prompt:\n{}\n\nResponse:\n{}\n\nDetails:\n{}\n",
        conversation.name, conversation.system_prompt, conversation.summary, conversation.details
    )
}

pub fn format_models(selected: &ModelId) -> String {
    ModelId::all()
        .map(|m| {
            let marker = if &m == selected { "*" } else { " " };
            format!("{} {:<14} {}", marker, m.display_name(), m.as_str())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
