//! Server-Sent Events frame decoding.
//!
//! The beautify stream carries one event per line:
//! ```text
//! data: {"content": "<div>"}
//! data: {"content": "</div>"}
//! data: {"done": true}
//! ```
//!
//! [`FrameDecoder`] turns arbitrary byte chunks into complete lines, and
//! [`parse_frame`] classifies one line into the events it carries.

use serde_json::{Map, Value};
use tracing::trace;

use crate::model::{EventFrame, StreamEvent};

/// Prefix marking a frame line.
pub const FRAME_PREFIX: &str = "data:";

/// Incremental UTF-8 decoder and line splitter.
///
/// Bytes of a multi-byte character split across chunks are held back until
/// the character is complete. Text after the last newline stays buffered
/// until a later chunk terminates it or [`FrameDecoder::finish`] flushes it.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Undecoded tail of an incomplete UTF-8 sequence
    pending: Vec<u8>,

    /// Decoded text of the current, unterminated line
    buffer: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completes, without the newline.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        self.decode_pending();
        self.take_lines()
    }

    /// Flush what is left at end of stream.
    ///
    /// An incomplete UTF-8 tail is replaced with U+FFFD. Returns the final
    /// unterminated line, if any text remains.
    pub fn finish(mut self) -> Option<String> {
        if !self.pending.is_empty() {
            self.buffer.push_str(&String::from_utf8_lossy(&self.pending));
        }
        Some(self.buffer).filter(|line| !line.is_empty())
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.buffer.is_empty()
    }

    fn decode_pending(&mut self) {
        let mut start = 0;
        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid = start + e.valid_up_to();
                    // from_utf8 guarantees this prefix is valid
                    if let Ok(text) = std::str::from_utf8(&self.pending[start..valid]) {
                        self.buffer.push_str(text);
                    }
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            start = valid + len;
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes
                            start = valid;
                            break;
                        }
                    }
                }
            }
        }
        self.pending.drain(..start);
    }

    fn take_lines(&mut self) -> Vec<String> {
        let Some(last) = self.buffer.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(last + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);
        complete[..last]
            .split('\n')
            .map(str::to_string)
            .collect()
    }
}

/// Parse an SSE line to extract the data portion.
///
/// # Example
/// ```
/// use beautify::sse::parse_sse_line;
///
/// assert_eq!(parse_sse_line("data: {\"done\":true}"), Some("{\"done\":true}"));
/// assert_eq!(parse_sse_line("data:{}"), Some("{}"));
/// assert_eq!(parse_sse_line(": keep-alive"), None);
/// ```
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix(FRAME_PREFIX).map(|s| s.trim())
}

/// Classify one line of the stream.
///
/// Lines without the `data:` prefix and frames whose payload is not a JSON
/// object yield no events.
pub fn parse_frame(line: &str) -> Vec<StreamEvent> {
    let Some(data) = parse_sse_line(line) else {
        return Vec::new();
    };

    match serde_json::from_str::<Map<String, Value>>(data) {
        Ok(object) => EventFrame::from_object(&object).into_events(),
        Err(e) => {
            trace!(error = %e, "skipping malformed frame");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sse_line() {
        assert_eq!(parse_sse_line("data: hello"), Some("hello"));
        assert_eq!(
            parse_sse_line("data: {\"key\": \"value\"}"),
            Some("{\"key\": \"value\"}")
        );
        assert_eq!(parse_sse_line("data:   spaces  \r"), Some("spaces"));
        assert_eq!(parse_sse_line("event: content"), None);
        assert_eq!(parse_sse_line(" data: x"), None);
        assert_eq!(parse_sse_line(""), None);
    }

    #[test]
    fn test_parse_frame() {
        assert_eq!(
            parse_frame("data: {\"content\":\"He\"}"),
            vec![StreamEvent::Content("He".to_string())]
        );
        assert_eq!(parse_frame("data:{\"done\":true}"), vec![StreamEvent::Done]);
        assert!(parse_frame("{\"content\":\"no prefix\"}").is_empty());
        assert!(parse_frame("data: {not json").is_empty());
        assert!(parse_frame("data: [DONE]").is_empty());
    }

    #[test]
    fn test_non_object_payloads_are_ignored() {
        assert!(parse_frame("data: [\"injected\"]").is_empty());
        assert!(parse_frame("data: [null, null, \"boom\"]").is_empty());
        assert!(parse_frame("data: \"text\"").is_empty());
        assert!(parse_frame("data: 42").is_empty());
        assert!(parse_frame("data: true").is_empty());
        assert!(parse_frame("data: null").is_empty());
    }

    #[test]
    fn test_decoder_keeps_partial_line() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(b"data: {\"con").is_empty());
        assert_eq!(
            decoder.push(b"tent\":\"a\"}\ndata: x\ndata"),
            vec!["data: {\"content\":\"a\"}".to_string(), "data: x".to_string()]
        );
        assert!(!decoder.is_empty());
        assert_eq!(decoder.finish(), Some("data".to_string()));
    }

    #[test]
    fn test_decoder_keeps_empty_lines() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(
            decoder.push(b"a\n\nb\n"),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
        assert!(decoder.is_empty());
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_decoder_joins_split_multibyte_character() {
        let text = "data: {\"content\":\"héllo 美\"}\n";
        let bytes = text.as_bytes();
        let mut decoder = FrameDecoder::new();
        let mut lines = Vec::new();
        for byte in bytes {
            lines.extend(decoder.push(std::slice::from_ref(byte)));
        }
        assert_eq!(lines, vec![text.trim_end_matches('\n').to_string()]);
    }

    #[test]
    fn test_decoder_replaces_invalid_bytes() {
        let mut decoder = FrameDecoder::new();
        let lines = decoder.push(b"a\xffb\n");
        assert_eq!(lines, vec!["a\u{fffd}b".to_string()]);
    }

    #[test]
    fn test_finish_flushes_incomplete_sequence() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(&[b'x', 0xe7, 0xbe]).is_empty());
        assert_eq!(decoder.finish(), Some("x\u{fffd}".to_string()));
    }
}
