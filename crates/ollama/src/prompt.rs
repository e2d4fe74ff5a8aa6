//! Transcript building for Ollama's single-prompt API.

use llm::{ChatRequest, Role};

/// Flatten system prompt, history, and the current message into one
/// newline-delimited transcript with fixed role labels, ending with a bare
/// `Assistant:` cue so the model continues from there.
pub fn build_prompt(request: &ChatRequest) -> String {
    let mut parts = Vec::with_capacity(request.history.len() + 3);

    if let Some(system) = &request.system_prompt {
        parts.push(format!("System: {system}"));
    }

    for message in &request.history {
        let label = match message.role {
            Role::User => "Human",
            Role::Assistant => "Assistant",
            Role::System => "System",
        };
        parts.push(format!("{label}: {}", message.content));
    }

    parts.push(format!("Human: {}", request.message));
    parts.push("Assistant:".to_owned());

    parts.join("\n\n")
}
