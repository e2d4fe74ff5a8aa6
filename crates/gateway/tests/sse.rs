//! Outgoing SSE re-encoding tests.

use futures_util::{StreamExt, stream};
use serde_json::json;
use whodini_gateway::sse;
use llm::{Error, Provider, Result, StreamChunk};

#[tokio::test]
async fn encode_frames_chunks_and_appends_done() {
    let chunks: Vec<Result<StreamChunk>> = vec![
        Ok(StreamChunk::text("Hel", json!({"model": "gpt-4o"}))),
        Ok(StreamChunk::text("lo", json!({"model": "gpt-4o"}))),
        Ok(StreamChunk::terminal()),
    ];

    let frames: Vec<String> = sse::encode(stream::iter(chunks)).collect().await;

    assert_eq!(frames.len(), 4);
    assert!(frames[0].starts_with("data: {"));
    assert!(frames[0].ends_with("\n\n"));
    assert_eq!(frames[3], sse::DONE_FRAME);

    let first: StreamChunk = serde_json::from_str(
        frames[0].trim_start_matches("data: ").trim_end(),
    )
    .unwrap();
    assert_eq!(first.content, "Hel");
    assert!(!first.done);
}

#[tokio::test]
async fn encode_turns_mid_stream_failure_into_error_frame() {
    let chunks: Vec<Result<StreamChunk>> = vec![
        Ok(StreamChunk::text("partial", json!({}))),
        Err(Error::Api {
            provider: Provider::Perplexity,
            status: 502,
            body: "bad gateway".to_owned(),
        }),
    ];

    let frames: Vec<String> = sse::encode(stream::iter(chunks)).collect().await;

    // Partial content, then the error frame, then the terminator.
    assert_eq!(frames.len(), 3);
    assert!(frames[1].contains("\"error\""));
    assert!(frames[1].contains("bad gateway"));
    assert_eq!(frames[2], sse::DONE_FRAME);
}

#[test]
fn is_done_recognizes_only_the_sentinel() {
    assert!(sse::is_done(sse::DONE_FRAME));
    assert!(sse::is_done("data: [DONE]"));
    assert!(!sse::is_done("data: {\"content\":\"[DONE]?\"}"));
    assert!(!sse::is_done("event: message"));
}
