use chrono::{Duration, Utc};
use polls::model::{NewChoice, NewQuestion};
use polls::persist::{PersistenceMode, Persistor};
use polls::store::{ChoiceStore, QuestionStore};

#[test]
fn in_memory_mode_allows_basic_operations() {
    let store = Persistor::open(PersistenceMode::InMemory).expect("store");
    let question = store.create_question(NewQuestion::now("in memory")).unwrap();
    store.create_choice(NewChoice::new(question.id(), "yes")).unwrap();
    assert_eq!(store.count_questions().unwrap(), 1);
    // a second in-memory store starts empty
    let other = Persistor::open(PersistenceMode::InMemory).expect("store");
    assert_eq!(other.count_questions().unwrap(), 0);
}

#[test]
fn file_mode_survives_reopening() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("polls.sqlite").to_string_lossy().into_owned();
    let pub_date = Utc::now() - Duration::days(1);
    let (question_id, choice_id) = {
        let store = Persistor::open(PersistenceMode::File(path.clone())).expect("store");
        let question = store.create_question(NewQuestion::new("durable", pub_date)).unwrap();
        let mut choice = store.create_choice(NewChoice::new(question.id(), "kept")).unwrap();
        choice.vote();
        store.update_choice(&choice).unwrap();
        (question.id(), choice.id())
    };
    let reopened = Persistor::open(PersistenceMode::File(path)).expect("reopened store");
    let question = reopened.get_question(question_id).unwrap();
    assert_eq!(question.question_text, "durable");
    assert_eq!(question.pub_date, polls::datatype::Timestamp::truncate(pub_date));
    assert_eq!(reopened.get_choice(choice_id).unwrap().votes, 1);
    // the cascade still holds after reopening
    reopened.delete_question(question_id).unwrap();
    assert!(reopened.choices_of(question_id).unwrap().is_empty());
}
