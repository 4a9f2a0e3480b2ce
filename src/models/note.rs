//! Note is a file holding questions, each of which yields one or more cards
use super::Card;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub cards: Vec<Card>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Note {
    pub path: String,
    pub questions: Vec<Question>,
}

impl Note {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            questions: Vec::new(),
        }
    }

    /// All cards of all questions, in file order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.questions.iter().flat_map(|q| q.cards.iter())
    }
}
