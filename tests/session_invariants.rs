//! Property tests for session lifecycle invariants.

use proptest::prelude::*;

use parley::domain::conversation::{ConversationSession, Message, SessionKey, SessionState};
use parley::domain::foundation::{QuestionId, RespondentId, SurveyId};
use parley::domain::survey::Question;

/// A session-mutating operation, applied blindly; invalid applications are
/// expected to fail without corrupting state.
#[derive(Debug, Clone)]
enum Op {
    BeginAsking,
    Record(String),
    Advance,
    Complete,
    Push(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::BeginAsking),
        "[a-z ]{1,12}".prop_map(Op::Record),
        Just(Op::Advance),
        Just(Op::Complete),
        "[a-z ]{1,12}".prop_map(Op::Push),
    ]
}

fn session(question_count: usize) -> ConversationSession {
    let key = SessionKey::new(
        SurveyId::new("s1").unwrap(),
        RespondentId::new("r1").unwrap(),
    );
    let questions = (0..question_count)
        .map(|i| {
            Question::new(
                QuestionId::new(format!("q{}", i)).unwrap(),
                format!("Question {}?", i),
                i as u32,
            )
            .unwrap()
        })
        .collect();
    ConversationSession::new(key, questions, Message::assistant("Hi!").unwrap())
}

fn apply(session: &mut ConversationSession, op: &Op) {
    match op {
        Op::BeginAsking => {
            let _ = session.begin_asking();
        }
        Op::Record(text) => {
            if !text.trim().is_empty() {
                let _ = session.record_response(text.clone());
            }
        }
        Op::Advance => {
            let _ = session.advance_question();
        }
        Op::Complete => {
            let _ = session.complete();
        }
        Op::Push(text) => {
            if let Ok(message) = Message::respondent(text.clone()) {
                session.push_message(message);
            }
        }
    }
}

proptest! {
    /// The question index never decreases, never skips, and never exceeds
    /// the last question, across arbitrary operation sequences.
    #[test]
    fn question_index_is_monotonic_and_bounded(
        question_count in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut session = session(question_count);
        let mut last_index = session.current_question_index();

        for op in &ops {
            apply(&mut session, op);

            let index = session.current_question_index();
            if let Some(i) = index {
                prop_assert!(i < question_count);
                prop_assert!(i >= last_index.unwrap_or(0));
                if let Some(prev) = last_index {
                    prop_assert!(i <= prev + 1);
                }
            } else {
                // None only before the first question is asked
                prop_assert_eq!(last_index, None);
            }
            last_index = index;
        }
    }

    /// Once complete, a session never leaves the complete state.
    #[test]
    fn complete_is_terminal(
        question_count in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut session = session(question_count);
        let mut seen_complete = false;

        for op in &ops {
            apply(&mut session, op);
            if seen_complete {
                prop_assert_eq!(session.state(), SessionState::Complete);
            }
            seen_complete |= session.state() == SessionState::Complete;
        }
    }

    /// The message log only ever grows, and existing entries are untouched.
    #[test]
    fn message_log_is_append_only(
        question_count in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut session = session(question_count);
        let mut last_ids: Vec<_> = session.messages().iter().map(|m| *m.id()).collect();

        for op in &ops {
            apply(&mut session, op);

            let ids: Vec<_> = session.messages().iter().map(|m| *m.id()).collect();
            prop_assert!(ids.len() >= last_ids.len());
            prop_assert_eq!(&ids[..last_ids.len()], &last_ids[..]);
            last_ids = ids;
        }
    }

    /// Advancing resets the per-question turn counter.
    #[test]
    fn advancement_resets_turn_count(
        question_count in 2usize..6,
        answers in prop::collection::vec("[a-z]{1,8}", 1..5),
    ) {
        let mut session = session(question_count);
        session.begin_asking().unwrap();

        for answer in &answers {
            session.record_response(answer.clone()).unwrap();
        }
        prop_assert_eq!(session.respondent_turns_on_question(), answers.len() as u32);

        session.advance_question().unwrap();
        prop_assert_eq!(session.respondent_turns_on_question(), 0);
    }
}
