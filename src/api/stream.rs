// SPDX-License-Identifier: MPL-2.0
//! Incremental UTF-8 decoding of a streamed response body.
//!
//! Network chunks may split a multi-byte character. The accumulator keeps
//! the incomplete tail until the next chunk completes it, replaces invalid
//! sequences with U+FFFD the way `String::from_utf8_lossy` does, and keeps
//! the whole decoded response.

/// Decodes a byte stream chunk by chunk.
#[derive(Debug, Default, Clone)]
pub struct Utf8Accumulator {
    text: String,
    pending: Vec<u8>,
}

impl Utf8Accumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the text it completed.
    ///
    /// The returned slice may be empty when the chunk only carried part of a
    /// character.
    pub fn push(&mut self, bytes: &[u8]) -> &str {
        let start = self.text.len();

        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut rest = input.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    self.text
                        .push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        &self.text[start..]
    }

    /// Ends the stream. A dangling partial character becomes U+FFFD.
    /// Returns the text this added, if any.
    pub fn finish(&mut self) -> &str {
        let start = self.text.len();
        if !self.pending.is_empty() {
            self.pending.clear();
            self.text.push(char::REPLACEMENT_CHARACTER);
        }
        &self.text[start..]
    }

    /// Everything decoded so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Whether bytes of an incomplete character are waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
