//! View payloads handed to whatever renders them.
//!
//! One struct per view, serializable as JSON. Nothing here touches a store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Choice, ChoiceId, Question, QuestionId};
use crate::query::PollResults;

/// Shown by the index view when there is nothing to list.
pub const NO_POLLS_MESSAGE: &str = "No polls are available.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub was_published_recently: bool,
}

impl QuestionSummary {
    pub fn new(question: &Question, now: DateTime<Utc>) -> Self {
        Self {
            id: question.id(),
            question_text: question.question_text.clone(),
            pub_date: question.pub_date,
            was_published_recently: question.was_published_recently(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub id: ChoiceId,
    pub choice_text: String,
    pub votes: u32,
}

impl From<&Choice> for ChoiceView {
    fn from(choice: &Choice) -> Self {
        Self { id: choice.id(), choice_text: choice.choice_text.clone(), votes: choice.votes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexPage {
    pub latest_question_list: Vec<QuestionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IndexPage {
    pub fn new(questions: &[Question], now: DateTime<Utc>) -> Self {
        let message = questions.is_empty().then(|| NO_POLLS_MESSAGE.to_string());
        Self {
            latest_question_list: questions.iter().map(|q| QuestionSummary::new(q, now)).collect(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPage {
    pub question: QuestionSummary,
    pub choices: Vec<ChoiceView>,
}

impl DetailPage {
    pub fn new(question: &Question, choices: &[Choice], now: DateTime<Utc>) -> Self {
        Self {
            question: QuestionSummary::new(question, now),
            choices: choices.iter().map(ChoiceView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsPage {
    pub question: QuestionSummary,
    pub choices: Vec<ChoiceView>,
    pub total_votes: u64,
}

impl ResultsPage {
    pub fn new(results: &PollResults, now: DateTime<Utc>) -> Self {
        Self {
            question: QuestionSummary::new(&results.question, now),
            choices: results.choices.iter().map(ChoiceView::from).collect(),
            total_votes: results.total_votes,
        }
    }
}
