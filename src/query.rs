//! The three reads behind the views.
//!
//! Every function takes the instant it should answer for, rather than reading
//! a clock, so results are reproducible. A question that exists but is not
//! yet published is reported exactly like one that does not exist.

use chrono::{DateTime, Utc};

use crate::error::{PollsError, Result};
use crate::model::{Choice, Question, QuestionId};
use crate::store::{ChoiceStore, QuestionFilter, QuestionOrder, QuestionStore};

/// Published questions, most recent first. Equal dates put the later identity first.
pub fn latest_questions<S: QuestionStore + ?Sized>(
    store: &S,
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Result<Vec<Question>> {
    store.list_questions(QuestionFilter::published(now).limit(limit), QuestionOrder::Newest)
}

pub fn get_visible_question<S: QuestionStore + ?Sized>(
    store: &S,
    id: QuestionId,
    now: DateTime<Utc>,
) -> Result<Question> {
    let question = store.get_question(id)?;
    if !question.is_published(now) {
        return Err(PollsError::not_found("question", id.0));
    }
    Ok(question)
}

/// A visible question with its choices and the votes they add up to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResults {
    pub question: Question,
    pub choices: Vec<Choice>,
    pub total_votes: u64,
}

pub fn get_results<S: QuestionStore + ChoiceStore + ?Sized>(
    store: &S,
    id: QuestionId,
    now: DateTime<Utc>,
) -> Result<PollResults> {
    let question = get_visible_question(store, id, now)?;
    let choices = store.choices_of(id)?;
    let total_votes = choices.iter().map(|c| u64::from(c.votes)).sum();
    Ok(PollResults { question, choices, total_votes })
}
