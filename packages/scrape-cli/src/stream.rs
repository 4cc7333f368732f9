//! Incremental SSE frame parsing.
//!
//! The response body arrives as opaque byte chunks with no alignment to
//! frame boundaries; a chunk can end mid-frame or mid-UTF-8-sequence. The
//! reader keeps a byte carry-over buffer, splits on the blank-line frame
//! delimiter, and parses each complete frame. Malformed frames and SSE
//! comment lines (keep-alives) are dropped silently; one corrupt frame must
//! never kill the consumer.

use server_core::scrape::ProgressEvent;

#[derive(Default)]
pub struct FrameReader {
    buffer: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<ProgressEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = find_delimiter(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..pos + 2).collect();
            if let Some(event) = parse_frame(&frame[..pos]) {
                events.push(event);
            }
        }
        events
    }
}

fn find_delimiter(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

/// Parse one frame: join its `data:` lines, ignore everything else
/// (comments, event names), skip anything that is not valid JSON.
fn parse_frame(frame: &[u8]) -> Option<ProgressEvent> {
    let text = std::str::from_utf8(frame).ok()?;
    let data: String = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
        .collect();
    if data.is_empty() {
        return None;
    }
    serde_json::from_str(&data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(frames: &[&str]) -> Vec<u8> {
        frames
            .iter()
            .map(|f| format!("data: {f}\n\n"))
            .collect::<String>()
            .into_bytes()
    }

    fn sample_stream() -> Vec<u8> {
        wire(&[
            r#"{"type":"init","total":2,"skipped":1}"#,
            r#"{"type":"progress","index":1,"total":2,"name":"Acme","success":true,"contentLength":1500}"#,
            r#"{"type":"progress","index":2,"total":2,"name":"Béta ünïcode","success":false,"error":"timeout"}"#,
            r#"{"type":"done","results":[]}"#,
        ])
    }

    fn feed_in_chunks(bytes: &[u8], chunk_size: usize) -> Vec<ProgressEvent> {
        let mut reader = FrameReader::new();
        let mut events = Vec::new();
        for chunk in bytes.chunks(chunk_size) {
            events.extend(reader.push(chunk));
        }
        events
    }

    #[test]
    fn whole_stream_parses_in_order() {
        let events = feed_in_chunks(&sample_stream(), usize::MAX);
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], ProgressEvent::Init { total: 2, skipped: 1 }));
        assert!(matches!(events[3], ProgressEvent::Done { .. }));
    }

    #[test]
    fn arbitrary_chunk_boundaries_yield_identical_events() {
        let bytes = sample_stream();
        let whole = feed_in_chunks(&bytes, usize::MAX);
        // Every chunk size, including 1 byte (which splits the multi-byte
        // UTF-8 characters in the third frame).
        for chunk_size in 1..=bytes.len() {
            let chunked = feed_in_chunks(&bytes, chunk_size);
            assert_eq!(chunked, whole, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn malformed_frame_is_skipped_without_losing_neighbors() {
        let mut bytes = wire(&[r#"{"type":"init","total":1,"skipped":0}"#]);
        bytes.extend_from_slice(b"data: {not json at all\n\n");
        bytes.extend_from_slice(b"data: {\"type\":\"unknown\"}\n\n");
        bytes.extend(wire(&[r#"{"type":"done","results":[]}"#]));

        let events = feed_in_chunks(&bytes, 7);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ProgressEvent::Init { .. }));
        assert!(matches!(events[1], ProgressEvent::Done { .. }));
    }

    #[test]
    fn keep_alive_comments_are_ignored() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b":keep-alive\n\n");
        bytes.extend(wire(&[r#"{"type":"init","total":0,"skipped":0}"#]));
        bytes.extend_from_slice(b": ping\n\n");

        let events = feed_in_chunks(&bytes, 3);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ProgressEvent::Init { .. }));
    }

    #[test]
    fn incomplete_trailing_frame_is_carried_not_emitted() {
        let mut reader = FrameReader::new();
        let events = reader.push(b"data: {\"type\":\"init\",");
        assert!(events.is_empty());
        let events = reader.push(b"\"total\":3,\"skipped\":0}\n\n");
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ProgressEvent::Init { total: 3, skipped: 0 }));
    }
}
