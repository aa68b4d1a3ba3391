// used for persistence
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::datatype::Timestamp;
use crate::error::{PollsError, Result};
use crate::model::{Choice, ChoiceId, NewChoice, NewQuestion, Question, QuestionId};
use crate::store::{ChoiceStore, QuestionFilter, QuestionOrder, QuestionStore};

/// Where the tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

impl PersistenceMode {
    /// `:memory:` (or nothing at all) keeps everything in memory, anything else is a file path.
    pub fn from_setting(database: &str) -> Self {
        match database.trim() {
            "" | ":memory:" => PersistenceMode::InMemory,
            path => PersistenceMode::File(path.to_string()),
        }
    }
}

// ------------- Persistence -------------
pub struct Persistor {
    db: Connection,
}

impl Persistor {
    pub fn open(mode: PersistenceMode) -> Result<Self> {
        let connection = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        info!(?mode, "opening poll store");
        Self::new(connection)
    }

    /// Takes over an open connection and makes sure the tables exist.
    pub fn new(connection: Connection) -> Result<Self> {
        // Foreign keys are off by default in SQLite and the cascade depends on them.
        // The "STRICT" keyword breaks JDBC connections, so it is left out.
        connection.execute_batch(
            "
            pragma foreign_keys = on;
            create table if not exists Question (
                id integer primary key autoincrement,
                question_text text not null,
                pub_date integer not null
            );
            create table if not exists Choice (
                id integer primary key autoincrement,
                question_id integer not null,
                choice_text text not null,
                votes integer not null default 0,
                constraint Choice_has_nonnegative_votes check (
                    votes >= 0
                ),
                constraint Choice_belongs_to_Question foreign key (
                    question_id
                ) references Question(id) on delete cascade
            );
            create index if not exists Question_by_pub_date on Question (pub_date);
            create index if not exists Choice_by_Question on Choice (question_id);
            ",
        )?;
        Ok(Persistor { db: connection })
    }

    #[cfg(test)]
    fn connection(&self) -> &Connection {
        &self.db
    }

    fn question_exists(&self, id: QuestionId) -> Result<bool> {
        let found = self
            .db
            .prepare_cached("select 1 from Question where id = ?1")?
            .query_row(params![id.0], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PollsError::Invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn question_from_row(row: &Row) -> rusqlite::Result<Question> {
    let pub_date: Timestamp = row.get(2)?;
    Ok(Question::new(QuestionId(row.get(0)?), row.get(1)?, pub_date.instant()))
}

fn choice_from_row(row: &Row) -> rusqlite::Result<Choice> {
    Ok(Choice::new(
        ChoiceId(row.get(0)?),
        QuestionId(row.get(1)?),
        row.get(2)?,
        row.get(3)?,
    ))
}

fn order_clause(order: QuestionOrder) -> &'static str {
    match order {
        QuestionOrder::Newest => "order by pub_date desc, id desc",
        QuestionOrder::Oldest => "order by pub_date asc, id asc",
        QuestionOrder::Insertion => "order by id asc",
    }
}

impl QuestionStore for Persistor {
    fn create_question(&self, question: NewQuestion) -> Result<Question> {
        require_text("question_text", &question.question_text)?;
        let pub_date = Timestamp::new(question.pub_date);
        self.db
            .prepare_cached(
                "
                insert into Question (
                    question_text,
                    pub_date
                ) values (?1, ?2)
            ",
            )?
            .execute(params![&question.question_text, &pub_date])?;
        let id = QuestionId(self.db.last_insert_rowid());
        debug!(%id, "question created");
        Ok(Question::new(id, question.question_text, pub_date.instant()))
    }

    fn get_question(&self, id: QuestionId) -> Result<Question> {
        self.db
            .prepare_cached(
                "
                select id, question_text, pub_date
                    from Question
                    where id = ?1
            ",
            )?
            .query_row(params![id.0], question_from_row)
            .optional()?
            .ok_or(PollsError::not_found("question", id.0))
    }

    fn list_questions(&self, filter: QuestionFilter, order: QuestionOrder) -> Result<Vec<Question>> {
        // A negative limit means no limit to SQLite.
        let limit = filter
            .limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1);
        let published_at_or_before = filter.published_at_or_before.map(Timestamp::new);
        let sql = format!(
            "
            select id, question_text, pub_date
                from Question
                where (?1 is null or pub_date <= ?1)
                {}
                limit ?2
            ",
            order_clause(order)
        );
        let mut statement = self.db.prepare_cached(&sql)?;
        let questions = statement
            .query_map(params![published_at_or_before, limit], question_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(questions)
    }

    fn update_question(&self, question: &Question) -> Result<()> {
        require_text("question_text", &question.question_text)?;
        let changed = self
            .db
            .prepare_cached(
                "
                update Question
                    set question_text = ?2,
                        pub_date = ?3
                    where id = ?1
            ",
            )?
            .execute(params![
                question.id().0,
                &question.question_text,
                Timestamp::new(question.pub_date)
            ])?;
        if changed == 0 {
            return Err(PollsError::not_found("question", question.id().0));
        }
        debug!(id = %question.id(), "question saved");
        Ok(())
    }

    fn delete_question(&self, id: QuestionId) -> Result<()> {
        let removed = self
            .db
            .prepare_cached("delete from Question where id = ?1")?
            .execute(params![id.0])?;
        if removed == 0 {
            return Err(PollsError::not_found("question", id.0));
        }
        debug!(%id, "question deleted along with its choices");
        Ok(())
    }

    fn count_questions(&self) -> Result<u64> {
        let count: i64 = self
            .db
            .prepare_cached("select count(*) from Question")?
            .query_row([], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl ChoiceStore for Persistor {
    fn create_choice(&self, choice: NewChoice) -> Result<Choice> {
        require_text("choice_text", &choice.choice_text)?;
        if !self.question_exists(choice.question_id)? {
            return Err(PollsError::not_found("question", choice.question_id.0));
        }
        self.db
            .prepare_cached(
                "
                insert into Choice (
                    question_id,
                    choice_text,
                    votes
                ) values (?1, ?2, 0)
            ",
            )?
            .execute(params![choice.question_id.0, &choice.choice_text])?;
        let id = ChoiceId(self.db.last_insert_rowid());
        debug!(%id, question = %choice.question_id, "choice created");
        Ok(Choice::new(id, choice.question_id, choice.choice_text, 0))
    }

    fn get_choice(&self, id: ChoiceId) -> Result<Choice> {
        self.db
            .prepare_cached(
                "
                select id, question_id, choice_text, votes
                    from Choice
                    where id = ?1
            ",
            )?
            .query_row(params![id.0], choice_from_row)
            .optional()?
            .ok_or(PollsError::not_found("choice", id.0))
    }

    fn choices_of(&self, question: QuestionId) -> Result<Vec<Choice>> {
        let mut statement = self.db.prepare_cached(
            "
            select id, question_id, choice_text, votes
                from Choice
                where question_id = ?1
                order by id asc
        ",
        )?;
        let choices = statement
            .query_map(params![question.0], choice_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(choices)
    }

    fn update_choice(&self, choice: &Choice) -> Result<()> {
        require_text("choice_text", &choice.choice_text)?;
        if !self.question_exists(choice.question_id)? {
            return Err(PollsError::not_found("question", choice.question_id.0));
        }
        let changed = self
            .db
            .prepare_cached(
                "
                update Choice
                    set question_id = ?2,
                        choice_text = ?3,
                        votes = ?4
                    where id = ?1
            ",
            )?
            .execute(params![
                choice.id().0,
                choice.question_id.0,
                &choice.choice_text,
                choice.votes
            ])?;
        if changed == 0 {
            return Err(PollsError::not_found("choice", choice.id().0));
        }
        debug!(id = %choice.id(), votes = choice.votes, "choice saved");
        Ok(())
    }

    fn delete_choice(&self, id: ChoiceId) -> Result<()> {
        let removed = self
            .db
            .prepare_cached("delete from Choice where id = ?1")?
            .execute(params![id.0])?;
        if removed == 0 {
            return Err(PollsError::not_found("choice", id.0));
        }
        debug!(%id, "choice deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn persistor() -> Persistor {
        Persistor::open(PersistenceMode::InMemory).unwrap()
    }

    #[test]
    fn persistence_mode_from_setting() {
        assert_eq!(PersistenceMode::from_setting(":memory:"), PersistenceMode::InMemory);
        assert_eq!(PersistenceMode::from_setting(""), PersistenceMode::InMemory);
        assert_eq!(
            PersistenceMode::from_setting("polls.db"),
            PersistenceMode::File("polls.db".into())
        );
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let persistor = persistor();
        persistor.create_question(NewQuestion::now("kept")).unwrap();
        let connection = persistor.db;
        let again = Persistor::new(connection).unwrap();
        assert_eq!(again.count_questions().unwrap(), 1);
    }

    #[test]
    fn empty_text_is_rejected() {
        let persistor = persistor();
        let err = persistor.create_question(NewQuestion::now("  ")).unwrap_err();
        assert!(matches!(err, PollsError::Invalid(_)));
        let question = persistor.create_question(NewQuestion::now("Q")).unwrap();
        let err = persistor.create_choice(NewChoice::new(question.id(), "")).unwrap_err();
        assert!(matches!(err, PollsError::Invalid(_)));
    }

    #[test]
    fn limit_and_order_are_applied_in_sql() {
        let persistor = persistor();
        let now = Utc::now();
        for days in [3, 1, 2] {
            persistor
                .create_question(NewQuestion::new(format!("{days} days"), now - Duration::days(days)))
                .unwrap();
        }
        let oldest = persistor
            .list_questions(QuestionFilter::all().limit(Some(2)), QuestionOrder::Oldest)
            .unwrap();
        let texts: Vec<_> = oldest.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["3 days", "2 days"]);
        let inserted = persistor
            .list_questions(QuestionFilter::all(), QuestionOrder::Insertion)
            .unwrap();
        let texts: Vec<_> = inserted.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["3 days", "1 days", "2 days"]);
    }

    #[test]
    fn foreign_keys_are_enforced_by_sqlite_too() {
        let persistor = persistor();
        let result = persistor.connection().execute(
            "insert into Choice (question_id, choice_text, votes) values (999, 'orphan', 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn negative_votes_are_refused() {
        let persistor = persistor();
        let question = persistor.create_question(NewQuestion::now("Q")).unwrap();
        let choice = persistor.create_choice(NewChoice::new(question.id(), "C")).unwrap();
        let result = persistor.connection().execute(
            "update Choice set votes = -1 where id = ?1",
            params![choice.id().0],
        );
        assert!(result.is_err());
    }
}
