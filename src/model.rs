//! The two records the application keeps: questions and the choices they own.
//!
//! Records returned from a store always carry their assigned identity. The
//! `New*` variants are what callers hand to a store before an identity exists.

use chrono::{DateTime, Utc};
use serde::Serialize;

// used to print out readable forms of a record
use std::fmt;

use crate::visibility;

// ------------- Identities -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChoiceId(pub i64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ------------- Question -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// Only stores assign identities, so only stores build a `Question`.
    pub(crate) fn new(id: QuestionId, question_text: String, pub_date: DateTime<Utc>) -> Self {
        Self { id, question_text, pub_date }
    }
    pub fn id(&self) -> QuestionId {
        self.id
    }
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        visibility::is_published(self.pub_date, now)
    }
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        visibility::is_recent(self.pub_date, now)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.question_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(question_text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self { question_text: question_text.into(), pub_date }
    }
    /// A question published at the moment it is created.
    pub fn now(question_text: impl Into<String>) -> Self {
        Self::new(question_text, Utc::now())
    }
}

// ------------- Choice -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub votes: u32,
}

impl Choice {
    pub(crate) fn new(id: ChoiceId, question_id: QuestionId, choice_text: String, votes: u32) -> Self {
        Self { id, question_id, choice_text, votes }
    }
    pub fn id(&self) -> ChoiceId {
        self.id
    }
    /// Counts one more vote. Nothing is persisted until the choice is saved again.
    pub fn vote(&mut self) {
        self.votes = self.votes.saturating_add(1);
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.choice_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChoice {
    pub question_id: QuestionId,
    pub choice_text: String,
}

impl NewChoice {
    pub fn new(question_id: QuestionId, choice_text: impl Into<String>) -> Self {
        Self { question_id, choice_text: choice_text.into() }
    }
}
