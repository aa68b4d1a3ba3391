//! Polls – a small polling application: questions, their choices, and three views.
//!
//! A [`model::Question`] has a publication date and becomes visible once that
//! date is reached. Each question owns zero or more [`model::Choice`]s, which
//! collect votes. Three views read from the store:
//! * **index** – published questions, newest first (or a "No polls are
//!   available." message when there are none).
//! * **detail** – one published question with its choices.
//! * **results** – one published question with its choices and the vote total.
//!
//! A question that exists but is not yet published is indistinguishable from
//! one that does not exist at all: both come back as [`PollsError::NotFound`].
//!
//! ## Modules
//! * [`visibility`] – Pure publication rules (`is_published`, `is_recent`).
//! * [`model`] – The question and choice records.
//! * [`datatype`] – How instants are kept in SQLite.
//! * [`store`] – Repository traits, one per record type.
//! * [`persist`] – SQLite implementation of the repositories.
//! * [`query`] – The reads behind the views.
//! * [`present`] – Serializable payloads, one per view.
//! * [`interface`] – The shared entry point holding the store and the clock.
//! * [`server`] – HTTP routes (axum).
//! * [`config`] – Layered runtime settings.
//!
//! ## Quick Start
//! ```
//! use chrono::{Duration, Utc};
//! use polls::persist::{PersistenceMode, Persistor};
//! use polls::model::{NewChoice, NewQuestion};
//! use polls::store::{ChoiceStore, QuestionStore};
//! use polls::query;
//!
//! let store = Persistor::open(PersistenceMode::InMemory).unwrap();
//! let now = Utc::now();
//! let question = store
//!     .create_question(NewQuestion::new("What's up?", now - Duration::hours(1)))
//!     .unwrap();
//! store.create_choice(NewChoice::new(question.id(), "Not much")).unwrap();
//! store.create_question(NewQuestion::new("Later", now + Duration::days(1))).unwrap();
//!
//! let latest = query::latest_questions(&store, now, None).unwrap();
//! assert_eq!(latest.len(), 1);
//! assert_eq!(query::get_results(&store, question.id(), now).unwrap().choices.len(), 1);
//! ```

pub mod config;
pub mod datatype;
pub mod error;
pub mod interface;
pub mod model;
pub mod persist;
pub mod present;
pub mod query;
pub mod server;
pub mod store;
pub mod visibility;

pub use error::{PollsError, Result};
