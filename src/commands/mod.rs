pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::config::GuideProfile;
use crate::session::ChatSession;
use std::sync::Arc;

pub use dispatcher::create_command_registry;

/// Mutable state the slash commands act on.
pub struct ChatState {
    pub session: Arc<ChatSession>,
    pub profile: GuideProfile,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new(session: Arc<ChatSession>, profile: GuideProfile) -> Self {
        Self {
            session,
            profile,
            should_continue: true,
        }
    }
}
