use crate::config::GuideProfile;
use crate::conversation::Turn;
use crate::core::error::GuideError;
use async_trait::async_trait;

pub mod client;
pub mod gemini;

/// A generative endpoint that turns an instruction plus conversation turns
/// into one complete reply. No streaming, no partial output.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    fn clone_backend(&self) -> Box<dyn GenerativeBackend>;

    async fn generate(&self, instruction: &str, turns: &[Turn]) -> Result<String, GuideError>;
}

/// The one boundary between the chat loop and the outside world. The
/// instruction profile is rendered once at construction and is not
/// configurable by callers afterwards.
pub struct Gateway {
    backend: Box<dyn GenerativeBackend>,
    profile: GuideProfile,
    instruction: String,
}

impl Gateway {
    pub fn new(backend: Box<dyn GenerativeBackend>, profile: GuideProfile) -> Self {
        let instruction = profile.instruction();
        Self {
            backend,
            profile,
            instruction,
        }
    }

    pub fn profile(&self) -> &GuideProfile {
        &self.profile
    }

    /// Resolve one chat turn. Never fails: the prior turns plus the new user
    /// turn go to the backend, and any failure on the way collapses into the
    /// profile's fallback line. Failures are logged, not surfaced.
    pub async fn send(&self, user_text: &str, prior_turns: &[Turn]) -> String {
        let mut turns = prior_turns.to_vec();
        turns.push(Turn::user(user_text));

        match self.backend.generate(&self.instruction, &turns).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("generation request failed: {}", e);
                self.profile.fallback.clone()
            }
        }
    }
}

impl Clone for Gateway {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone_backend(),
            profile: self.profile.clone(),
            instruction: self.instruction.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingBackend {
        reply: Option<String>,
        requests: Arc<Mutex<Vec<(String, Vec<Turn>)>>>,
    }

    #[async_trait]
    impl GenerativeBackend for RecordingBackend {
        fn clone_backend(&self) -> Box<dyn GenerativeBackend> {
            Box::new(self.clone())
        }

        async fn generate(&self, instruction: &str, turns: &[Turn]) -> Result<String, GuideError> {
            self.requests
                .lock()
                .unwrap()
                .push((instruction.to_string(), turns.to_vec()));
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(GuideError::Api("wired to fail".to_string())),
            }
        }
    }

    fn gateway_with(backend: RecordingBackend) -> Gateway {
        Gateway::new(Box::new(backend), GuideProfile::default())
    }

    #[tokio::test]
    async fn backend_sees_prior_turns_with_the_user_turn_last() {
        let backend = RecordingBackend {
            reply: Some("sure".to_string()),
            ..RecordingBackend::default()
        };
        let requests = backend.requests.clone();
        let gateway = gateway_with(backend);

        let prior = vec![Turn::model("hello"), Turn::user("hi"), Turn::model("yes?")];
        let reply = gateway.send("Best food?", &prior).await;
        assert_eq!(reply, "sure");

        let requests = requests.lock().unwrap();
        let (instruction, turns) = &requests[0];
        assert!(instruction.contains("Alex"));
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[..3], prior[..]);
        assert_eq!(turns[3], Turn::user("Best food?"));
        assert_eq!(turns[3].role, Role::User);
    }

    #[tokio::test]
    async fn backend_failure_collapses_into_the_fallback_line() {
        let gateway = gateway_with(RecordingBackend::default());
        let reply = gateway.send("tour?", &[]).await;
        assert_eq!(reply, GuideProfile::default().fallback);
    }

    #[tokio::test]
    async fn empty_reply_text_is_a_valid_turn_not_a_failure() {
        let backend = RecordingBackend {
            reply: Some(String::new()),
            ..RecordingBackend::default()
        };
        let gateway = gateway_with(backend);
        let reply = gateway.send("anything", &[]).await;
        assert_eq!(reply, "");
    }
}
