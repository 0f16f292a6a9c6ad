//! In-memory conversation history for a single chat session.

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Append-only ordered sequence of turns. Insertion order is conversation
/// order; nothing is ever removed or reordered. The whole history lives and
/// dies with the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation opened by the guide's greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        Self {
            turns: vec![Turn::model(greeting)],
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_seeds_a_model_turn() {
        let conversation = Conversation::with_greeting("Hi, I'm Lisa.");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.turns()[0], Turn::model("Hi, I'm Lisa."));
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.append(Turn::user("first"));
        conversation.append(Turn::model("second"));
        conversation.append(Turn::user("third"));

        let texts: Vec<&str> = conversation
            .turns()
            .iter()
            .map(|turn| turn.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn reading_twice_yields_equal_sequences() {
        let mut conversation = Conversation::with_greeting("hello");
        conversation.append(Turn::user("question"));

        let first: Vec<Turn> = conversation.turns().to_vec();
        let second: Vec<Turn> = conversation.turns().to_vec();
        assert_eq!(first, second);
    }
}
