//! Scenario tests for the rule engine.

use parlor::{
    Cell, GameBoard, GridBoard, Mark, Mode, MoveRejection, Participant, PlayerMove, Session,
    apply, play, validate,
};

fn two_human_grid() -> (Session, Participant, Participant) {
    let alice = Participant::human("U_ALICE");
    let bob = Participant::human("U_BOB");
    let session = Session::new(
        GameBoard::Grid(GridBoard::new()),
        alice.clone(),
        bob.clone(),
        alice.clone(),
    );
    (session, alice, bob)
}

fn grid(session: &Session) -> &GridBoard {
    match session.board() {
        GameBoard::Grid(board) => board,
        GameBoard::Word(_) => panic!("Expected a grid board"),
    }
}

/// Plays a fixed sequence of cell indices, alternating actors starting
/// with the session's turn holder.
fn play_sequence(mut session: Session, cells: &[usize]) -> Session {
    for cell in cells {
        let actor = session.turn_holder().clone();
        session = play(&session, &actor, &PlayerMove::Place(*cell)).expect("Move failed");
    }
    session
}

#[test]
fn test_apply_changes_exactly_one_cell_and_flips_turn() {
    for cell in 0..9 {
        let (session, alice, bob) = two_human_grid();
        let next = apply(&session, &PlayerMove::Place(cell));

        let before = grid(&session).cells();
        let after = grid(&next).cells();
        for index in 0..9 {
            if index == cell {
                assert_eq!(after[index], Cell::Taken(Mark::First), "cell {cell}");
            } else {
                assert_eq!(after[index], before[index], "cell {cell}, index {index}");
            }
        }

        assert_eq!(*session.turn_holder(), alice);
        assert_eq!(*next.turn_holder(), bob);
    }
}

#[test]
fn test_top_row_win_scenario() {
    // Alice takes the top row while Bob interleaves elsewhere.
    let (session, alice, _) = two_human_grid();
    let done = play_sequence(session, &[0, 3, 1, 4, 2]);

    assert_eq!(*done.mode(), Mode::WinState);
    assert_eq!(done.winner(), Some(&alice));
}

#[test]
fn test_every_line_wins_for_either_side() {
    const LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];

    fn forms_line(a: usize, b: usize, c: usize) -> bool {
        LINES.iter().any(|line| {
            let mut cells = [a, b, c];
            cells.sort_unstable();
            let mut line = *line;
            line.sort_unstable();
            cells == line
        })
    }

    for line in LINES {
        let fillers: Vec<usize> = (0..9).filter(|cell| !line.contains(cell)).collect();

        // First mover takes the line, second fills elsewhere.
        let (session, alice, _) = two_human_grid();
        let done = play_sequence(
            session,
            &[line[0], fillers[0], line[1], fillers[1], line[2]],
        );
        assert_eq!(*done.mode(), Mode::WinState, "line {line:?}");
        assert_eq!(done.winner(), Some(&alice), "line {line:?}");

        // Second mover takes the line; the first mover's three cells are
        // picked so they never complete a line of their own first.
        let third = fillers
            .iter()
            .copied()
            .skip(2)
            .find(|cell| !forms_line(fillers[0], fillers[1], *cell))
            .expect("No safe filler cell");

        let (session, _, bob) = two_human_grid();
        let done = play_sequence(
            session,
            &[fillers[0], line[0], fillers[1], line[1], third, line[2]],
        );
        assert_eq!(*done.mode(), Mode::WinState, "line {line:?}");
        assert_eq!(done.winner(), Some(&bob), "line {line:?}");
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    // 1|2|1
    // 1|2|2
    // 2|1|1
    let (session, _, _) = two_human_grid();
    let done = play_sequence(session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(*done.mode(), Mode::DrawState);
    assert_eq!(done.winner(), None);
}

#[test]
fn test_terminal_session_rejects_every_move() {
    let (session, alice, bob) = two_human_grid();
    let done = play_sequence(session, &[0, 3, 1, 4, 2]);
    assert!(done.mode().is_terminal());

    for actor in [&alice, &bob, &Participant::Bot] {
        for cell in 0..9 {
            assert_eq!(
                validate(&done, actor, &PlayerMove::Place(cell)),
                Err(MoveRejection::GameFinished)
            );
        }
        assert_eq!(
            validate(&done, actor, &PlayerMove::Guess('a')),
            Err(MoveRejection::GameFinished)
        );
    }
}

#[test]
fn test_word_cat_guessed_letter_by_letter() {
    let human = Participant::human("U123");
    let mut session = Session::new_hangman("U123", "cat".to_string());

    session = play(&session, &human, &PlayerMove::Guess('c')).expect("Guess failed");
    assert_eq!(*session.mode(), Mode::InProgress);

    // Repeating a guessed letter is rejected mid-game.
    assert_eq!(
        validate(&session, &human, &PlayerMove::Guess('c')),
        Err(MoveRejection::LetterRepeated)
    );

    session = play(&session, &human, &PlayerMove::Guess('a')).expect("Guess failed");
    assert_eq!(*session.mode(), Mode::InProgress);

    session = play(&session, &human, &PlayerMove::Guess('t')).expect("Guess failed");
    assert_eq!(*session.mode(), Mode::WinState);
    assert_eq!(session.winner(), Some(&human));
}

#[test]
fn test_six_wrong_guesses_exhaust_the_game() {
    let human = Participant::human("U123");
    let mut session = Session::new_hangman("U123", "cat".to_string());

    for (round, letter) in ['q', 'w', 'e', 'r', 'u', 'i'].into_iter().enumerate() {
        session = play(&session, &human, &PlayerMove::Guess(letter)).expect("Guess failed");
        if round < 5 {
            assert_eq!(*session.mode(), Mode::InProgress, "round {round}");
        }
    }

    assert_eq!(*session.mode(), Mode::GameOverState);
    assert_eq!(session.winner(), None);

    // Exhausted games accept nothing further.
    assert_eq!(
        validate(&session, &human, &PlayerMove::Guess('c')),
        Err(MoveRejection::GameFinished)
    );
}

#[test]
fn test_codec_round_trip_along_a_whole_game() {
    let (mut session, _, _) = two_human_grid();
    for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        let actor = session.turn_holder().clone();
        session = play(&session, &actor, &PlayerMove::Place(cell)).expect("Move failed");

        let encoded = session.board().encode();
        let decoded =
            GameBoard::decode(session.kind(), &encoded).expect("Decode failed");
        assert_eq!(&decoded, session.board());
    }

    let human = Participant::human("U123");
    let mut session = Session::new_hangman("U123", "lantern".to_string());
    for letter in ['l', 'x', 'a', 'n', 'q', 't', 'e', 'r'] {
        session = play(&session, &human, &PlayerMove::Guess(letter)).expect("Guess failed");

        let encoded = session.board().encode();
        let decoded =
            GameBoard::decode(session.kind(), &encoded).expect("Decode failed");
        assert_eq!(&decoded, session.board());
    }
}

#[test]
fn test_mode_never_regresses_from_terminal() {
    let (session, _, _) = two_human_grid();
    let done = play_sequence(session, &[0, 3, 1, 4, 2]);

    // apply is never called on terminal sessions in practice (validate
    // gates it), and play refuses outright.
    let actor = done.turn_holder().clone();
    assert_eq!(
        play(&done, &actor, &PlayerMove::Place(8)),
        Err(MoveRejection::GameFinished)
    );
}
