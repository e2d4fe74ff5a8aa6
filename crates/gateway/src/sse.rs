//! Re-encoding of chunk sequences as outgoing Server-Sent-Events.
//!
//! Whatever framing the backend used, the caller gets `data: <json>\n\n`
//! frames ending with a literal `data: [DONE]\n\n`. A failure mid-stream
//! cannot become an HTTP error (headers are long committed), so it is
//! emitted as a final out-of-band error frame before the terminator; the
//! chunks already sent stand as partial content.

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{DONE_SENTINEL, Result, StreamChunk};
use serde_json::json;

/// The terminating frame, identical for every backend.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Encode one chunk as an SSE frame.
pub fn frame(chunk: &StreamChunk) -> serde_json::Result<String> {
    let json = serde_json::to_string(chunk)?;
    Ok(format!("data: {json}\n\n"))
}

/// Map a chunk sequence into SSE frames, always ending with `[DONE]`.
pub fn encode<S>(chunks: S) -> impl Stream<Item = String>
where
    S: Stream<Item = Result<StreamChunk>>,
{
    stream! {
        let mut chunks = std::pin::pin!(chunks);
        while let Some(item) = chunks.next().await {
            match item {
                Ok(chunk) => match frame(&chunk) {
                    Ok(encoded) => yield encoded,
                    Err(e) => tracing::warn!("dropping unencodable chunk: {e}"),
                },
                Err(e) => {
                    tracing::error!("stream aborted: {e}");
                    yield format!("data: {}\n\n", json!({ "error": e.to_string() }));
                    break;
                }
            }
        }
        yield DONE_FRAME.to_owned();
    }
}

/// True when a frame is the terminator, for callers that need to stop
/// relaying on the sentinel rather than stream end.
pub fn is_done(frame: &str) -> bool {
    frame
        .strip_prefix("data: ")
        .is_some_and(|payload| payload.trim() == DONE_SENTINEL)
}
