//! Shared entry point for serving the poll views.
//!
//! [`PollsInterface`] owns the store behind a mutex together with the clock
//! that decides what "now" is. Every view call reads the clock once, so one
//! request sees one consistent instant. Calls block on store I/O; async callers
//! should run them on a blocking thread.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::model::QuestionId;
use crate::persist::Persistor;
use crate::present::{DetailPage, IndexPage, ResultsPage};
use crate::query;
use crate::store::ChoiceStore;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// Always answers with the same instant. Useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> { self.0 }
}

pub struct PollsInterface {
    store: Mutex<Persistor>, // one connection, one caller at a time
    clock: Box<dyn Clock>,
    index_limit: Option<usize>,
}

impl PollsInterface {
    pub fn new(store: Persistor) -> Self {
        Self { store: Mutex::new(store), clock: Box::new(SystemClock), index_limit: None }
    }
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
    /// Caps how many questions the index lists. `None` lists all of them.
    pub fn with_index_limit(mut self, limit: Option<usize>) -> Self {
        self.index_limit = limit;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Locks the store for direct use, e.g. to seed questions.
    pub fn store(&self) -> Result<MutexGuard<'_, Persistor>> {
        Ok(self.store.lock()?)
    }

    pub fn index(&self) -> Result<IndexPage> {
        let started = Instant::now();
        let now = self.now();
        let questions = query::latest_questions(&*self.store()?, now, self.index_limit)?;
        info!(ms = started.elapsed().as_secs_f64() * 1000.0, listed = questions.len(), "index served");
        Ok(IndexPage::new(&questions, now))
    }

    pub fn detail(&self, id: QuestionId) -> Result<DetailPage> {
        let started = Instant::now();
        let now = self.now();
        let store = self.store()?;
        let question = query::get_visible_question(&*store, id, now)?;
        let choices = store.choices_of(id)?;
        info!(ms = started.elapsed().as_secs_f64() * 1000.0, %id, "detail served");
        Ok(DetailPage::new(&question, &choices, now))
    }

    pub fn results(&self, id: QuestionId) -> Result<ResultsPage> {
        let started = Instant::now();
        let now = self.now();
        let results = query::get_results(&*self.store()?, id, now)?;
        info!(ms = started.elapsed().as_secs_f64() * 1000.0, %id, votes = results.total_votes, "results served");
        Ok(ResultsPage::new(&results, now))
    }
}
