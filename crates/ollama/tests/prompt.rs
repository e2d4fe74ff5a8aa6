//! Tests for the single-prompt transcript builder.

use llm::{ChatRequest, Message, Provider};
use whodini_ollama::build_prompt;

#[test]
fn transcript_flattens_system_history_and_cue() {
    let mut request = ChatRequest::new("H2", "llama3.2", Provider::Ollama);
    request.system_prompt = Some("S".to_owned());
    request.history = vec![Message::user("H1"), Message::assistant("A1")];

    assert_eq!(
        build_prompt(&request),
        "System: S\n\nHuman: H1\n\nAssistant: A1\n\nHuman: H2\n\nAssistant:"
    );
}

#[test]
fn transcript_without_system_prompt() {
    let request = ChatRequest::new("hello", "llama3.2", Provider::Ollama);
    assert_eq!(build_prompt(&request), "Human: hello\n\nAssistant:");
}

#[test]
fn transcript_labels_system_history_messages() {
    let mut request = ChatRequest::new("go", "llama3.2", Provider::Ollama);
    request.history = vec![Message::system("be brief")];

    assert_eq!(
        build_prompt(&request),
        "System: be brief\n\nHuman: go\n\nAssistant:"
    );
}
