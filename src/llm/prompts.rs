use crate::models::{ReasoningMode, TaskType};

pub const REFINER_ROLE: &str = "You are an expert at refining prompts.";
pub const REVIEWER_ROLE: &str = "You are an expert reviewer and grader.";
pub const SUMMARIZER_ROLE: &str = "You are an expert in summarizing and analyzing feedback.";

/// A fixed step of the advance-steps chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep {
    Refine,
    Respond,
    Review,
    Summarize,
}

impl ChainStep {
    /// The respond step runs without a system message.
    pub fn system_role(&self) -> Option<&'static str> {
        match self {
            ChainStep::Refine => Some(REFINER_ROLE),
            ChainStep::Respond => None,
            ChainStep::Review => Some(REVIEWER_ROLE),
            ChainStep::Summarize => Some(SUMMARIZER_ROLE),
        }
    }

    pub fn user_message(&self, input: &str) -> String {
        match self {
            ChainStep::Refine => format!(
                "Please improve the following prompt for optimal results:\n{}",
                input
            ),
            ChainStep::Respond => input.to_string(),
            ChainStep::Review => format!("Please review and grade the following response:\n{}", input),
            ChainStep::Summarize => format!(
                "Please analyze and summarize the following review feedback:\n{}",
                input
            ),
        }
    }

    pub fn progress_label(&self) -> &'static str {
        match self {
            ChainStep::Refine => "Improving the prompt...",
            ChainStep::Respond => "Generating response for the improved prompt...",
            ChainStep::Review => "Reviewing and grading the response...",
            ChainStep::Summarize => "Analyzing and summarizing review points...",
        }
    }
}

const RESEARCH_EXEMPLAR: &str = r#"Thought 1: I need to gather detailed information about the impact of climate change on coastal cities.
Act 1: Search["impact of climate change on coastal cities"]
Obs 1: The search results include scientific articles, government reports, and case studies on the impact of rising sea levels on coastal cities.
Thought 2: The information seems scattered. I need to focus on retrieving case studies from government reports.
Act 2: Search["case studies from government reports on rising sea levels"]
Obs 2: Found multiple case studies from NOAA and the EPA detailing the impact on specific cities.
Thought 3: I have enough case studies but need to summarize key points.
Act 3: Summarize["key points from case studies on rising sea levels"]
Act 4: Finish[summary of key points]"#;

const DEBUGGING_EXEMPLAR: &str = r#"Thought 1: I need to debug a Python script that’s throwing a TypeError.
Act 1: Review["Python script TypeError"]
Obs 1: The TypeError is due to a mismatch in data types when calling a function.
Thought 2: I should identify the exact line causing the error and check the data types involved.
Act 2: Inspect["line of code causing TypeError and data types"]
Obs 2: The error is occurring because an integer is being passed where a string is expected.
Thought 3: I need to correct the data type mismatch and rerun the script.
Act 3: Modify["correct data type from integer to string"]
Act 4: Finish[rerun the script]"#;

const CONTENT_EXEMPLAR: &str = r#"Thought 1: I need to write a blog post on the benefits of AI in healthcare.
Act 1: Generate["outline for blog post on AI in healthcare"]
Obs 1: The outline includes sections on diagnostic tools, personalized medicine, and operational efficiency.
Thought 2: I should expand the section on personalized medicine with examples.
Act 2: Research["examples of personalized medicine using AI"]
Obs 2: Found examples of AI-driven treatments for cancer and diabetes.
Thought 3: I can now draft the personalized medicine section with these examples.
Act 3: Write["draft section on personalized medicine with AI examples"]
Act 4: Finish[draft complete]"#;

const PLANNING_EXEMPLAR: &str = r#"Thought 1: I need to develop a strategic plan for increasing customer retention.
Act 1: Identify["key factors affecting customer retention"]
Obs 1: Key factors include product satisfaction, customer support quality, and engagement strategies.
Thought 2: I should focus on improving customer support and engagement strategies.
Act 2: Develop["action plan for improving customer support and engagement"]
Obs 2: Created a plan including personalized communication, regular feedback loops, and loyalty programs.
Thought 3: I need to present this plan to the executive team.
Act 3: Prepare["presentation for executive team on customer retention strategies"]
Act 4: Finish[presentation ready]"#;

/// Thought/Act/Obs transcript appended to multi-path queries.
pub fn exemplar(task: TaskType) -> &'static str {
    match task {
        TaskType::ResearchAndInformationRetrieval => RESEARCH_EXEMPLAR,
        TaskType::CodeDebugging => DEBUGGING_EXEMPLAR,
        TaskType::ContentGeneration => CONTENT_EXEMPLAR,
        TaskType::StrategicPlanning => PLANNING_EXEMPLAR,
    }
}

pub fn with_exemplar(query: &str, task: TaskType) -> String {
    format!("{}\n\n{}", query, exemplar(task))
}

pub fn report_user_message(query: &str, context: &str, mode: ReasoningMode) -> String {
    format!(
        "Context: {}\n\nQuery: {}\n\nReasoning Type: {}\n\nPlease provide a summary and details for this query, considering the given context if relevant.",
        context,
        query,
        mode.label()
    )
}

/// Renders the planning / reflection / output system template around a query.
pub fn enhanced_system_prompt(query: &str) -> String {
    format!(
        r#"<thinking>
1. Begin analyzing the question: "{query}"
2. Plan of action:
    a. Briefly outline the approach.
    b. Present a step-by-step reasoning process.
    c. Use "Chain of Thought" reasoning if needed, breaking it into steps.
    d. Consider alternative solutions if applicable.
</thinking>

<reflection>
1. Review reasoning.
2. Check for potential errors, optimizations, or enhancements.
3. Reflect on alternative approaches, if any.
</reflection>

<output>
Provide final answer based on the above reasoning and reflection.
</output>"#
    )
}

pub fn report_query_for_file(file_name: &str) -> String {
    format!("Generate a detailed report for the file: {}", file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_template_embeds_query_in_thinking() {
        let rendered = enhanced_system_prompt("Q");
        let start = rendered.find("<thinking>").unwrap();
        let end = rendered.find("</thinking>").unwrap();
        assert!(rendered[start..end].contains("\"Q\""));
        assert!(rendered.contains("<reflection>"));
        assert!(rendered.contains("<output>"));
    }

    #[test]
    fn test_code_debugging_exemplar_follows_query() {
        let query = with_exemplar("why does my script crash?", TaskType::CodeDebugging);
        assert!(query.starts_with("why does my script crash?"));
        assert!(query.ends_with(DEBUGGING_EXEMPLAR));
        assert!(query.contains("Act 4: Finish[rerun the script]"));
    }

    #[test]
    fn test_every_task_has_distinct_exemplar() {
        let seen: std::collections::HashSet<&str> =
            TaskType::ALL.iter().map(|t| exemplar(*t)).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_report_message_layout() {
        let message = report_user_message("what is rust", "ctx", ReasoningMode::MultiPath);
        assert!(message.starts_with("Context: ctx\n\nQuery: what is rust\n\nReasoning Type: Multi-path\n\n"));
    }

    #[test]
    fn test_respond_step_passes_input_through() {
        assert_eq!(ChainStep::Respond.user_message("improved"), "improved");
        assert!(ChainStep::Respond.system_role().is_none());
        assert_eq!(ChainStep::Refine.system_role(), Some(REFINER_ROLE));
    }
}
