use super::ChatState;
use crate::core::error::GuideError;
use console::style;
use std::sync::Arc;

pub trait CommandHandler {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, GuideError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct NewCommand;
pub struct ProfileCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, GuideError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Leave the chat"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, GuideError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = vec![
            title.to_string(),
            style(QuitCommand.help()).to_string(),
            style(HelpCommand.help()).to_string(),
            style(NewCommand.help()).to_string(),
            style(ProfileCommand.help()).to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for NewCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, GuideError> {
        // The old session is closed, not emptied; a request still in flight
        // can no longer write anywhere visible.
        state.session = Arc::new(state.session.renew());
        Ok(Some(format!(
            "{}\n{}",
            style("Started a fresh conversation.").dim(),
            state.profile.greeting
        )))
    }

    fn help(&self) -> &'static str {
        "/new - Close this conversation and start a fresh one"
    }
}

impl CommandHandler for ProfileCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, GuideError> {
        let profile = &state.profile;
        Ok(Some(format!(
            "{}\n{} - {}\n{}\nReach out: {}",
            style(&profile.name).bold(),
            profile.title,
            profile.city,
            style(&profile.tagline).italic(),
            profile.contact
        )))
    }

    fn help(&self) -> &'static str {
        "/profile - Show the active guide persona and contact handle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuideProfile;
    use crate::conversation::Turn;
    use crate::gateway::{Gateway, GenerativeBackend};
    use crate::session::ChatSession;
    use async_trait::async_trait;

    struct EchoBackend;

    #[async_trait]
    impl GenerativeBackend for EchoBackend {
        fn clone_backend(&self) -> Box<dyn GenerativeBackend> {
            Box::new(EchoBackend)
        }

        async fn generate(
            &self,
            _instruction: &str,
            turns: &[Turn],
        ) -> Result<String, GuideError> {
            Ok(turns.last().map(|turn| turn.text.clone()).unwrap_or_default())
        }
    }

    fn state() -> ChatState {
        let gateway = Gateway::new(Box::new(EchoBackend), GuideProfile::default());
        ChatState::new(
            Arc::new(ChatSession::new(gateway)),
            GuideProfile::default(),
        )
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = state();
        let output = QuitCommand.execute(&mut state, &[]).unwrap();
        assert!(output.is_none());
        assert!(!state.should_continue);
    }

    #[tokio::test]
    async fn new_closes_the_session_and_starts_from_the_greeting() {
        let mut state = state();
        state.session.submit("remember this").await;
        assert_eq!(state.session.turns().len(), 3);

        let old = state.session.clone();
        let output = NewCommand.execute(&mut state, &[]).unwrap().unwrap();

        assert!(old.is_closed());
        assert_eq!(state.session.turns().len(), 1);
        assert!(output.contains(&state.profile.greeting));
    }

    #[test]
    fn help_mentions_every_command() {
        let mut state = state();
        let output = HelpCommand.execute(&mut state, &[]).unwrap().unwrap();
        for name in ["/quit", "/help", "/new", "/profile"] {
            assert!(output.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn profile_shows_the_contact_handle() {
        let mut state = state();
        let output = ProfileCommand.execute(&mut state, &[]).unwrap().unwrap();
        assert!(output.contains("Alex_CQ_Insider"));
    }
}
