//! Wire-format decoders for streamed completions.
//!
//! Two framings reach the gateway: newline-delimited JSON objects (the
//! local backend) and Server-Sent-Event `data:` frames (the hosted
//! backends). Both are normalized here into `StreamChunk` sequences.
//!
//! The decoders are pure functions of an already-obtained byte stream and
//! hold no state beyond a partial-line byte buffer, so a frame split
//! across two reads still parses. The buffer stays raw bytes until a full
//! line is assembled: reads split at arbitrary byte boundaries, including
//! inside a multi-byte UTF-8 character. A line that fails to parse is
//! skipped, never fatal. A server closing the connection without a
//! terminal marker simply ends the sequence; that is not an error by
//! itself. Transport failures raise in-sequence at the point of failure,
//! and chunks already yielded stand.

use crate::{Error, Result, StreamChunk};
use async_stream::try_stream;
use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

/// Event-stream sentinel signaling end of stream, sent in place of JSON.
pub const DONE_SENTINEL: &str = "[DONE]";

const DATA_PREFIX: &str = "data: ";

/// Decode an NDJSON body: every line is one complete JSON frame of type
/// `F`, mapped into a chunk by `map`. The sequence stops consuming input
/// after yielding a chunk with `done` set.
pub fn ndjson<B, E, F, M>(body: B, mut map: M) -> impl Stream<Item = Result<StreamChunk>>
where
    B: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<Error>,
    F: DeserializeOwned,
    M: FnMut(F) -> StreamChunk,
{
    try_stream! {
        let mut body = std::pin::pin!(body);
        let mut buf = Vec::new();
        let mut finished = false;

        'read: while let Some(bytes) = body.next().await {
            let bytes = bytes.map_err(Into::<Error>::into)?;
            buf.extend_from_slice(&bytes);

            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                if let Some(chunk) = decode_line(line.trim(), &mut map) {
                    let done = chunk.done;
                    yield chunk;
                    if done {
                        finished = true;
                        break 'read;
                    }
                }
            }
        }

        // A final frame may arrive without a trailing newline.
        if !finished {
            let rest = String::from_utf8_lossy(&buf);
            if let Some(chunk) = decode_line(rest.trim(), &mut map) {
                yield chunk;
            }
        }
    }
}

/// Decode an event-stream body: only `data: ` lines matter. The literal
/// `[DONE]` sentinel terminates the sequence with an empty terminal chunk;
/// every other payload is parsed as a frame of type `F` and mapped by
/// `map`, which returns `None` for frames carrying no new content (e.g.
/// role-only deltas), which are consumed without producing output.
pub fn event_stream<B, E, F, M>(body: B, mut map: M) -> impl Stream<Item = Result<StreamChunk>>
where
    B: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<Error>,
    F: DeserializeOwned,
    M: FnMut(F) -> Option<StreamChunk>,
{
    try_stream! {
        let mut body = std::pin::pin!(body);
        let mut buf = Vec::new();
        let mut finished = false;

        'read: while let Some(bytes) = body.next().await {
            let bytes = bytes.map_err(Into::<Error>::into)?;
            buf.extend_from_slice(&bytes);

            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                match decode_frame(line.trim(), &mut map) {
                    Frame::Chunk(chunk) => yield chunk,
                    Frame::Done => {
                        yield StreamChunk::terminal();
                        finished = true;
                        break 'read;
                    }
                    Frame::Skip => {}
                }
            }
        }

        if !finished {
            let rest = String::from_utf8_lossy(&buf);
            match decode_frame(rest.trim(), &mut map) {
                Frame::Chunk(chunk) => yield chunk,
                Frame::Done => yield StreamChunk::terminal(),
                Frame::Skip => {}
            }
        }
    }
}

fn decode_line<F, M>(line: &str, map: &mut M) -> Option<StreamChunk>
where
    F: DeserializeOwned,
    M: FnMut(F) -> StreamChunk,
{
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<F>(line) {
        Ok(frame) => Some(map(frame)),
        Err(e) => {
            tracing::debug!("skipping malformed frame: {e}");
            None
        }
    }
}

enum Frame {
    Chunk(StreamChunk),
    Done,
    Skip,
}

fn decode_frame<F, M>(line: &str, map: &mut M) -> Frame
where
    F: DeserializeOwned,
    M: FnMut(F) -> Option<StreamChunk>,
{
    let Some(data) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    if data == DONE_SENTINEL {
        return Frame::Done;
    }
    match serde_json::from_str::<F>(data) {
        Ok(frame) => match map(frame) {
            Some(chunk) => Frame::Chunk(chunk),
            None => Frame::Skip,
        },
        Err(e) => {
            tracing::debug!("skipping malformed frame: {e}");
            Frame::Skip
        }
    }
}
