// SPDX-License-Identifier: MPL-2.0
//! Which long-running operations are in flight, and which actions that
//! allows.
//!
//! At most one chat request streams at a time. Uploading a document and
//! clearing the vector store exclude each other and are blocked while an
//! answer streams, since both change what the answer is retrieved from.

/// Identifies one chat request so that late events of a stopped request
/// can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Default)]
pub struct Activity {
    next_id: u64,
    chat: Option<RequestId>,
    uploading: bool,
    deleting: bool,
}

impl Activity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a chat request. Returns `None` while another one streams.
    pub fn begin_chat(&mut self) -> Option<RequestId> {
        if self.chat.is_some() {
            return None;
        }
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.chat = Some(id);
        Some(id)
    }

    /// Ends the chat request `id`. Returns `false` for a request that is no
    /// longer current.
    pub fn finish_chat(&mut self, id: RequestId) -> bool {
        if self.chat == Some(id) {
            self.chat = None;
            true
        } else {
            false
        }
    }

    /// Abandons the current chat request, returning its id.
    pub fn cancel_chat(&mut self) -> Option<RequestId> {
        self.chat.take()
    }

    /// Id of the chat request in flight.
    #[must_use]
    pub fn current_chat(&self) -> Option<RequestId> {
        self.chat
    }

    #[must_use]
    pub fn is_current_chat(&self, id: RequestId) -> bool {
        self.chat == Some(id)
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.chat.is_some()
    }

    /// Marks an upload as started. Returns `false` if it is not allowed now.
    pub fn begin_upload(&mut self) -> bool {
        if !self.can_upload(true) {
            return false;
        }
        self.uploading = true;
        true
    }

    pub fn finish_upload(&mut self) {
        self.uploading = false;
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Marks a vector store deletion as started. Returns `false` if it is
    /// not allowed now.
    pub fn begin_delete(&mut self) -> bool {
        if !self.can_clear_store() {
            return false;
        }
        self.deleting = true;
        true
    }

    pub fn finish_delete(&mut self) {
        self.deleting = false;
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    #[must_use]
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_streaming()
    }

    #[must_use]
    pub fn can_upload(&self, has_file: bool) -> bool {
        has_file && !self.is_streaming() && !self.deleting && !self.uploading
    }

    #[must_use]
    pub fn can_clear_store(&self) -> bool {
        !self.is_streaming() && !self.deleting && !self.uploading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_chat_request_at_a_time() {
        let mut activity = Activity::new();
        let first = activity.begin_chat().expect("idle activity accepts a chat");
        assert!(activity.begin_chat().is_none());
        assert!(activity.finish_chat(first));
        assert!(activity.begin_chat().is_some());
    }

    #[test]
    fn stale_request_ids_are_ignored() {
        let mut activity = Activity::new();
        let stopped = activity.begin_chat().unwrap();
        assert_eq!(activity.cancel_chat(), Some(stopped));

        let current = activity.begin_chat().unwrap();
        assert_ne!(stopped, current);
        assert!(!activity.finish_chat(stopped));
        assert!(activity.is_current_chat(current));
        assert!(activity.finish_chat(current));
        assert!(!activity.finish_chat(current));
    }

    #[test]
    fn send_needs_text_and_no_stream() {
        let mut activity = Activity::new();
        assert!(!activity.can_send(""));
        assert!(!activity.can_send("   \n"));
        assert!(activity.can_send("hi"));

        activity.begin_chat();
        assert!(!activity.can_send("hi"));
    }

    #[test]
    fn chat_is_allowed_during_upload_and_delete() {
        let mut activity = Activity::new();
        assert!(activity.begin_upload());
        assert!(activity.can_send("hi"));
        activity.finish_upload();

        assert!(activity.begin_delete());
        assert!(activity.can_send("hi"));
    }

    #[test]
    fn upload_requires_a_file_and_idle_state() {
        let mut activity = Activity::new();
        assert!(!activity.can_upload(false));
        assert!(activity.can_upload(true));

        let id = activity.begin_chat().unwrap();
        assert!(!activity.can_upload(true));
        activity.finish_chat(id);

        assert!(activity.begin_delete());
        assert!(!activity.can_upload(true));
        assert!(!activity.begin_upload());
        activity.finish_delete();

        assert!(activity.begin_upload());
        assert!(!activity.can_upload(true));
        assert!(!activity.begin_upload());
    }

    #[test]
    fn clearing_the_store_excludes_everything_else() {
        let mut activity = Activity::new();
        assert!(activity.can_clear_store());

        assert!(activity.begin_upload());
        assert!(!activity.can_clear_store());
        assert!(!activity.begin_delete());
        activity.finish_upload();

        let id = activity.begin_chat().unwrap();
        assert!(!activity.can_clear_store());
        activity.finish_chat(id);

        assert!(activity.begin_delete());
        assert!(activity.is_deleting());
        assert!(!activity.begin_delete());
        activity.finish_delete();
        assert!(activity.can_clear_store());
    }
}
