//! Repository interfaces, one per record type.
//!
//! The query layer only talks to these traits, so it does not care which
//! connection (or which kind of store) sits underneath. [`crate::persist::Persistor`]
//! is the SQLite implementation.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{Choice, ChoiceId, NewChoice, NewQuestion, Question, QuestionId};

/// Restricts which questions a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Keep only questions with `pub_date <= instant`.
    pub published_at_or_before: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl QuestionFilter {
    pub fn all() -> Self {
        Self::default()
    }
    pub fn published(now: DateTime<Utc>) -> Self {
        Self { published_at_or_before: Some(now), limit: None }
    }
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Ordering of a question listing. Equal dates fall back to the identity,
/// in the same direction as the date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestionOrder {
    #[default]
    Newest,
    Oldest,
    Insertion,
}

pub trait QuestionStore {
    /// Assigns an identity and persists the question.
    fn create_question(&self, question: NewQuestion) -> Result<Question>;
    /// Fails with `NotFound` when no question has this identity.
    fn get_question(&self, id: QuestionId) -> Result<Question>;
    fn list_questions(&self, filter: QuestionFilter, order: QuestionOrder) -> Result<Vec<Question>>;
    /// Full re-save of an existing question.
    fn update_question(&self, question: &Question) -> Result<()>;
    /// Removes the question together with every choice it owns.
    fn delete_question(&self, id: QuestionId) -> Result<()>;
    fn count_questions(&self) -> Result<u64>;
}

pub trait ChoiceStore {
    /// Votes start at zero. Fails with `NotFound` if the question does not exist.
    fn create_choice(&self, choice: NewChoice) -> Result<Choice>;
    fn get_choice(&self, id: ChoiceId) -> Result<Choice>;
    /// The reverse relation: every choice whose question is `question`, oldest first.
    fn choices_of(&self, question: QuestionId) -> Result<Vec<Choice>>;
    fn update_choice(&self, choice: &Choice) -> Result<()>;
    fn delete_choice(&self, id: ChoiceId) -> Result<()>;
}

/// Everything the views need from a store.
pub trait PollStore: QuestionStore + ChoiceStore {}

impl<S: QuestionStore + ChoiceStore> PollStore for S {}
