use crate::cli::Args;
use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::config::GuideProfile;
use crate::core::error::GuideError;
use crate::display;
use crate::gateway::Gateway;
use crate::input;
use crate::session::{ChatSession, SubmitOutcome};
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::sync::Arc;

pub struct Application {
    args: Args,
    profile: GuideProfile,
    session: Arc<ChatSession>,
    command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(args: Args, gateway: Gateway, command_dispatcher: CommandDispatcher) -> Self {
        let profile = gateway.profile().clone();
        Self {
            args,
            profile,
            session: Arc::new(ChatSession::new(gateway)),
            command_dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<(), GuideError> {
        let context = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| GuideError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        let question = match (self.args.question.as_deref(), context) {
            (Some(arg_q), Some(piped)) => Some(format!("{}\n\n{}", piped.trim(), arg_q)),
            (None, Some(piped)) => Some(piped),
            (Some(arg_q), None) => Some(arg_q.to_string()),
            (None, None) => None,
        };

        match question {
            Some(question) => self.handle_ask_mode(&question).await,
            None => self.handle_chat_mode().await,
        }
    }

    /// Single exchange against a fresh conversation, printed and done.
    async fn handle_ask_mode(&self, question: &str) -> Result<(), GuideError> {
        match self.session.submit(question).await {
            SubmitOutcome::Replied => {
                let turns = self.session.turns();
                let reply = turns
                    .last()
                    .map(|turn| turn.text.clone())
                    .unwrap_or_default();

                if reply.contains("```")
                    || reply.contains('*')
                    || reply.contains('`')
                    || reply.contains('#')
                {
                    display::display_markdown(&reply);
                } else {
                    display::display_reply(&self.profile.name, &reply);
                }
                Ok(())
            }
            SubmitOutcome::Ignored => {
                Err(GuideError::Input("Question is empty".to_string()))
            }
            SubmitOutcome::Busy | SubmitOutcome::Closed => Ok(()),
        }
    }

    async fn handle_chat_mode(&mut self) -> Result<(), GuideError> {
        display::display_banner(&self.profile);
        display::display_reply(&self.profile.name, &self.profile.greeting);

        let mut editor = input::create_editor(self.command_dispatcher.clone())?;
        let mut state = ChatState::new(self.session.clone(), self.profile.clone());

        loop {
            let line = match input::read_input(&mut editor)? {
                Some(line) => line.trim().to_string(),
                None => break,
            };

            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('/') {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if let Some((command, args)) = parts.split_first() {
                    match self.command_dispatcher.execute(command, args, &mut state) {
                        Ok(Some(output)) => println!("{}", output),
                        Ok(None) => {}
                        Err(e) => eprintln!("Error executing command: {}", e),
                    }

                    if !state.should_continue {
                        break;
                    }
                }
                continue;
            }

            display::display_reflecting(&self.profile.name);
            let outcome = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    state.session.close();
                    SubmitOutcome::Closed
                }
                outcome = state.session.submit(&line) => outcome,
            };
            display::clear_reflecting();

            match outcome {
                SubmitOutcome::Replied => {
                    let turns = state.session.turns();
                    if let Some(turn) = turns.last() {
                        display::display_reply(&self.profile.name, &turn.text);
                    }
                }
                SubmitOutcome::Closed => break,
                SubmitOutcome::Ignored | SubmitOutcome::Busy => {}
            }
        }

        state.session.close();
        input::save_history(&mut editor)?;

        Ok(())
    }
}
