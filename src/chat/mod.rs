// SPDX-License-Identifier: MPL-2.0
//! Chat view state and the lifecycle of a streamed answer.
//!
//! Sending appends the user message and an empty assistant message, which
//! the streamed [`ChatEvent`]s then fill. Events are tagged with the
//! [`RequestId`] they belong to; those of a stopped request are dropped.

pub mod activity;
pub mod conversation;

pub use activity::{Activity, RequestId};
pub use conversation::{ChatMessage, Conversation, Role};

use crate::api::ChatEvent;
use crate::error::Error;

/// What an applied [`ChatEvent`] means for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Text was appended; more may follow.
    Streaming,
    /// The answer is complete.
    Finished,
    /// The request failed; the caller reports `Error`.
    Failed(Error),
    /// The event belongs to a request that is no longer current.
    Stale,
}

/// Starts a chat turn for `input`. Returns `None` (and changes nothing)
/// when sending is not allowed.
pub fn start(conversation: &mut Conversation, activity: &mut Activity, input: &str) -> Option<RequestId> {
    if !activity.can_send(input) {
        return None;
    }
    let id = activity.begin_chat()?;
    conversation.push_user(input);
    conversation.begin_assistant();
    Some(id)
}

/// Folds one streamed event of request `id` into the conversation.
pub fn apply(
    conversation: &mut Conversation,
    activity: &mut Activity,
    id: RequestId,
    event: ChatEvent,
) -> Outcome {
    if !activity.is_current_chat(id) {
        return Outcome::Stale;
    }
    match event {
        ChatEvent::Delta(delta) => {
            conversation.append_to_assistant(&delta);
            Outcome::Streaming
        }
        ChatEvent::Finished => {
            activity.finish_chat(id);
            Outcome::Finished
        }
        ChatEvent::Failed(err) => {
            activity.finish_chat(id);
            conversation.discard_empty_assistant();
            Outcome::Failed(err)
        }
    }
}

/// Stops the current answer. Text received so far is kept; a placeholder
/// that never received any is removed.
pub fn stop(conversation: &mut Conversation, activity: &mut Activity) -> Option<RequestId> {
    let id = activity.cancel_chat()?;
    conversation.discard_empty_assistant();
    Some(id)
}
