//! Composing outgoing chat messages and handing them to a transport.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::error::{ChatError, ChatResult};

/// A message ready to be sent: trimmed text and an optional image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// Message text, already trimmed. May be empty when an image is attached.
    pub text: String,
    /// Attached image as a `data:image/...` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OutgoingMessage {
    /// Build a message from raw input.
    ///
    /// Returns `Ok(None)` when there is nothing to send: blank text and no
    /// image.
    pub fn compose(text: &str, image: Option<&str>) -> ChatResult<Option<Self>> {
        if image.is_some_and(|data| !data.starts_with("data:image/")) {
            return Err(ChatError::NotAnImage);
        }
        let text = text.trim();
        if text.is_empty() && image.is_none() {
            return Ok(None);
        }
        Ok(Some(Self {
            text: text.to_string(),
            image: image.map(str::to_string),
        }))
    }

    /// A text-only message, as sent when a reply suggestion is picked.
    pub fn text(text: &str) -> Option<Self> {
        Self::compose(text, None).ok().flatten()
    }
}

/// Where composed messages go. Implemented by the host chat client.
pub trait MessageSink {
    /// Deliver one message.
    fn send(&mut self, message: OutgoingMessage) -> ChatResult<()>;
}

/// Sink that keeps every message in memory.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Vec<OutgoingMessage>,
}

impl Outbox {
    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> &[OutgoingMessage] {
        &self.sent
    }
}

impl MessageSink for Outbox {
    fn send(&mut self, message: OutgoingMessage) -> ChatResult<()> {
        self.sent.push(message);
        Ok(())
    }
}

/// Sink that writes each message as one JSON line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn send(&mut self, message: OutgoingMessage) -> ChatResult<()> {
        let line = serde_json::to_string(&message)
            .map_err(|e| ChatError::Io(std::io::Error::other(e)))?;
        writeln!(self.out, "{line}")?;
        debug!(chars = message.text.len(), image = message.image.is_some(), "message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        let msg = OutgoingMessage::compose("  hello there \n", None).unwrap().unwrap();
        assert_eq!(msg.text, "hello there");
        assert_eq!(msg.image, None);
    }

    #[test]
    fn blank_text_without_image_is_nothing() {
        assert_eq!(OutgoingMessage::compose("   ", None).unwrap(), None);
        assert_eq!(OutgoingMessage::text(""), None);
    }

    #[test]
    fn image_alone_is_enough() {
        let msg = OutgoingMessage::compose("", Some("data:image/png;base64,AAAA"))
            .unwrap()
            .unwrap();
        assert_eq!(msg.text, "");
        assert!(msg.image.is_some());
    }

    #[test]
    fn non_image_attachment_rejected() {
        let err = OutgoingMessage::compose("hi", Some("data:text/plain;base64,AAAA")).unwrap_err();
        assert!(matches!(err, ChatError::NotAnImage));
    }

    #[test]
    fn outbox_keeps_order() {
        let mut outbox = Outbox::default();
        outbox.send(OutgoingMessage::text("one").unwrap()).unwrap();
        outbox.send(OutgoingMessage::text("two").unwrap()).unwrap();
        let texts: Vec<&str> = outbox.sent().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_message() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.send(OutgoingMessage::text("hey").unwrap()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "{\"text\":\"hey\"}\n");
    }
}
