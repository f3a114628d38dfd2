//! Tests for session store operations.

use tempfile::NamedTempFile;

use parlor::{
    GameKind, Participant, PlayerMove, Session, SessionStore, play,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready store.
fn setup_test_db() -> (NamedTempFile, SessionStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let store = SessionStore::new(db_path).expect("Failed to create store");
    store.run_migrations().expect("Migrations failed");
    (db_file, store)
}

#[test]
fn test_create_and_get_by_id() {
    let (_db, store) = setup_test_db();
    let session = Session::new_tictactoe("U123");

    let id = store.create(&session).expect("Create failed");
    assert_eq!(id, *session.session_id());

    let loaded = store
        .get_by_id(&id)
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(loaded, session);
}

#[test]
fn test_get_by_id_unknown_is_none() {
    let (_db, store) = setup_test_db();
    let missing = store
        .get_by_id(&uuid::Uuid::new_v4())
        .expect("Query failed");
    assert!(missing.is_none());
}

#[test]
fn test_get_latest_none_for_new_participant() {
    let (_db, store) = setup_test_db();
    let latest = store
        .get_latest(GameKind::Tictactoe, &Participant::human("U123"))
        .expect("Query failed");
    assert!(latest.is_none());
}

#[test]
fn test_get_latest_returns_most_recent() {
    let (_db, store) = setup_test_db();
    let first = Session::new_tictactoe("U123");
    let second = Session::new_tictactoe("U123");
    store.create(&first).expect("Create failed");
    store.create(&second).expect("Create failed");

    let latest = store
        .get_latest(GameKind::Tictactoe, &Participant::human("U123"))
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(latest.session_id(), second.session_id());
}

#[test]
fn test_get_latest_is_scoped_by_game_and_participant() {
    let (_db, store) = setup_test_db();
    let grid = Session::new_tictactoe("U123");
    let word = Session::new_hangman("U456", "cat".to_string());
    store.create(&grid).expect("Create failed");
    store.create(&word).expect("Create failed");

    let other_game = store
        .get_latest(GameKind::Hangman, &Participant::human("U123"))
        .expect("Query failed");
    assert!(other_game.is_none());

    let other_user = store
        .get_latest(GameKind::Tictactoe, &Participant::human("U456"))
        .expect("Query failed");
    assert!(other_user.is_none());

    let found = store
        .get_latest(GameKind::Hangman, &Participant::human("U456"))
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(found.session_id(), word.session_id());
}

#[test]
fn test_update_replaces_mutable_state_only() {
    let (_db, store) = setup_test_db();
    let session = Session::new_hangman("U123", "cat".to_string());
    store.create(&session).expect("Create failed");

    let human = Participant::human("U123");
    let next = play(&session, &human, &PlayerMove::Guess('c')).expect("Guess failed");
    store.update(&next).expect("Update failed");

    let loaded = store
        .get_by_id(session.session_id())
        .expect("Query failed")
        .expect("Session missing");

    // Mutable state advanced.
    assert_eq!(loaded.board(), next.board());
    assert_eq!(loaded.mode(), next.mode());
    // Identity fields untouched.
    assert_eq!(loaded.session_id(), session.session_id());
    assert_eq!(loaded.first_participant(), session.first_participant());
    assert_eq!(loaded.second_participant(), session.second_participant());
    assert_eq!(loaded.created_at(), session.created_at());
}

#[test]
fn test_update_without_row_fails() {
    let (_db, store) = setup_test_db();
    let session = Session::new_tictactoe("U123");
    let result = store.update(&session);
    assert!(result.is_err(), "Updating a never-created session should fail");
}

#[test]
fn test_sessions_are_never_deleted_by_new_ones() {
    let (_db, store) = setup_test_db();
    let first = Session::new_tictactoe("U123");
    let second = Session::new_tictactoe("U123");
    store.create(&first).expect("Create failed");
    store.create(&second).expect("Create failed");

    let old = store
        .get_by_id(first.session_id())
        .expect("Query failed")
        .expect("Historical session missing");
    assert_eq!(old.session_id(), first.session_id());
}
