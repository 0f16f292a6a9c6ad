//! Turn-taking state machine for one chat session.
//!
//! One session owns one conversation and one gateway. A turn moves the
//! session IDLE -> PENDING -> IDLE; only one request may be in flight at a
//! time, and closing the session discards whatever that request would have
//! produced.

use crate::conversation::{Conversation, Turn};
use crate::gateway::Gateway;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;

/// What became of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A user turn and its model (or fallback) turn were appended.
    Replied,
    /// Empty or whitespace-only input; nothing happened.
    Ignored,
    /// A request is already in flight; nothing happened.
    Busy,
    /// The session was closed before the reply arrived.
    Closed,
}

pub struct ChatSession {
    conversation: Mutex<Conversation>,
    gateway: Gateway,
    pending: AtomicBool,
    closed: CancellationToken,
}

impl ChatSession {
    /// Open a session seeded with the guide's greeting turn.
    pub fn new(gateway: Gateway) -> Self {
        let conversation = Conversation::with_greeting(&gateway.profile().greeting);
        Self {
            conversation: Mutex::new(conversation),
            gateway,
            pending: AtomicBool::new(false),
            closed: CancellationToken::new(),
        }
    }

    /// Ordered snapshot of the conversation so far.
    pub fn turns(&self) -> Vec<Turn> {
        self.conversation.lock().unwrap().turns().to_vec()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Discard the session. A request still in flight resolves to
    /// [`SubmitOutcome::Closed`] without touching the conversation.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Close this session and open a fresh one against the same gateway.
    pub fn renew(&self) -> ChatSession {
        self.close();
        ChatSession::new(self.gateway.clone())
    }

    /// Run one full chat turn: validate, append the user turn, await the
    /// gateway, append the reply. Re-entrant submissions are refused while a
    /// request is pending rather than queued.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.is_closed() {
            return SubmitOutcome::Closed;
        }
        if self.pending.swap(true, Ordering::SeqCst) {
            return SubmitOutcome::Busy;
        }
        let _pending = PendingGuard(&self.pending);

        // The gateway must see the history exactly as it stood before this
        // user turn was appended.
        let prior = self.turns();
        self.conversation.lock().unwrap().append(Turn::user(text));

        let reply = tokio::select! {
            biased;
            _ = self.closed.cancelled() => return SubmitOutcome::Closed,
            reply = self.gateway.send(text, &prior) => reply,
        };

        self.conversation.lock().unwrap().append(Turn::model(reply));
        SubmitOutcome::Replied
    }
}

/// Frees the single pending slot when the submission settles or is dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
