use crate::commands::dispatcher::CommandDispatcher;
use crate::config::Config;
use crate::core::error::GuideError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config as LineConfig, Context, Editor, Helper};

/// Completes slash commands; everything else is free text for the guide.
pub struct ChatHelper {
    commands: CommandDispatcher,
    hinter: HistoryHinter,
}

impl ChatHelper {
    pub fn new(commands: CommandDispatcher) -> Self {
        Self {
            commands,
            hinter: HistoryHinter {},
        }
    }
}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if let Some(command_part) = line[..pos].strip_prefix('/') {
            let matches: Vec<Pair> = self
                .commands
                .get_command_names()
                .iter()
                .filter(|name| name.starts_with(command_part))
                .map(|name| Pair {
                    display: format!("/{}", name),
                    replacement: name.clone(),
                })
                .collect();
            return Ok((1, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ChatHelper {}

impl Validator for ChatHelper {}

impl Helper for ChatHelper {}

/// Creates a configured rustyline editor
pub fn create_editor(
    commands: CommandDispatcher,
) -> Result<Editor<ChatHelper, FileHistory>, GuideError> {
    let config = LineConfig::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| GuideError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(ChatHelper::new(commands)));

    let _ = editor.load_history(&Config::input_history_path());

    Ok(editor)
}

/// Reads a line of input; `None` means the user closed the chat.
pub fn read_input(
    editor: &mut Editor<ChatHelper, FileHistory>,
) -> Result<Option<String>, GuideError> {
    let prompt = style("> ").bold().cyan().to_string();
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(&line);
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(GuideError::Input(format!("Input error: {}", err))),
    }
}

/// Saves the editor history
pub fn save_history(editor: &mut Editor<ChatHelper, FileHistory>) -> Result<(), GuideError> {
    let path = Config::input_history_path();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    editor
        .save_history(&path)
        .map_err(|e| GuideError::Input(format!("Failed to save input history: {}", e)))
}
