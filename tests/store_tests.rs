// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz data store tests: round-trips, ordering, cascade clearing, and
//! corruption recovery.

use quizgenius::models::{Difficulty, NewQuiz, NewQuizResult, Question};
use quizgenius::store::{LocalStore, QuizDataStore};
use std::collections::HashMap;
use tempfile::TempDir;

fn test_store() -> (QuizDataStore, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp data dir");
    let store = QuizDataStore::new(LocalStore::new(tmp.path()));
    (store, tmp)
}

fn sample_quiz(topic: &str) -> NewQuiz {
    let questions = vec![
        Question {
            id: "q1".to_string(),
            question_text: "2+2?".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            correct_answer: "4".to_string(),
        },
        Question {
            id: "q2".to_string(),
            question_text: "3+3?".to_string(),
            options: vec!["6".to_string(), "7".to_string()],
            correct_answer: "6".to_string(),
        },
    ];
    NewQuiz {
        topic: topic.to_string(),
        difficulty: Difficulty::Easy,
        num_questions: questions.len() as u32,
        questions,
        is_ai_generated: false,
    }
}

fn sample_result(quiz_id: &str, score: u32) -> NewQuizResult {
    NewQuizResult {
        quiz_id: quiz_id.to_string(),
        quiz_topic: "Math".to_string(),
        score,
        user_answers: HashMap::from([("q1".to_string(), "4".to_string())]),
        correct_answers: HashMap::from([("q1".to_string(), "4".to_string())]),
    }
}

const SCOPE: &str = "test-scope";

#[tokio::test]
async fn test_add_quiz_then_get_roundtrip() {
    let (store, _tmp) = test_store();

    let stored = store.add_quiz(SCOPE, sample_quiz("Math")).await.unwrap();
    assert!(!stored.id.is_empty());
    assert!(!stored.date_created.is_empty());
    assert_eq!(stored.num_questions, 2);

    let fetched = store.get_quiz_by_id(SCOPE, &stored.id).await.unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn test_get_quiz_absent() {
    let (store, _tmp) = test_store();
    assert!(store.get_quiz_by_id(SCOPE, "nope").await.is_none());
}

#[tokio::test]
async fn test_quizzes_keep_creation_order() {
    let (store, _tmp) = test_store();

    let first = store.add_quiz(SCOPE, sample_quiz("First")).await.unwrap();
    let second = store.add_quiz(SCOPE, sample_quiz("Second")).await.unwrap();

    let quizzes = store.list_quizzes(SCOPE).await;
    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0].id, first.id);
    assert_eq!(quizzes[1].id, second.id);
}

#[tokio::test]
async fn test_add_result_then_get_roundtrip() {
    let (store, _tmp) = test_store();

    let stored = store.add_result(SCOPE, sample_result("quiz-1", 50)).await.unwrap();
    let fetched = store.get_result_by_id(SCOPE, &stored.id).await.unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn test_results_are_most_recent_first() {
    let (store, _tmp) = test_store();

    let r1 = store.add_result(SCOPE, sample_result("quiz-1", 10)).await.unwrap();
    let r2 = store.add_result(SCOPE, sample_result("quiz-1", 20)).await.unwrap();
    let r3 = store.add_result(SCOPE, sample_result("quiz-1", 30)).await.unwrap();
    // A result for another quiz must not appear.
    store.add_result(SCOPE, sample_result("quiz-2", 99)).await.unwrap();

    let results = store.get_results_for_quiz(SCOPE, "quiz-1").await;
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![r3.id.as_str(), r2.id.as_str(), r1.id.as_str()]);
}

#[tokio::test]
async fn test_last_result_matches_ordering_head() {
    let (store, _tmp) = test_store();

    assert!(store.get_last_quiz_result(SCOPE, "quiz-1").await.is_none());

    store.add_result(SCOPE, sample_result("quiz-1", 10)).await.unwrap();
    let newest = store.add_result(SCOPE, sample_result("quiz-1", 20)).await.unwrap();

    let last = store.get_last_quiz_result(SCOPE, "quiz-1").await.unwrap();
    assert_eq!(last.id, newest.id);

    let results = store.get_results_for_quiz(SCOPE, "quiz-1").await;
    assert_eq!(results[0].id, last.id);
}

#[tokio::test]
async fn test_results_tolerate_absent_quiz() {
    let (store, _tmp) = test_store();

    // No quiz with this id was ever stored.
    store.add_result(SCOPE, sample_result("ghost", 75)).await.unwrap();

    let results = store.get_results_for_quiz(SCOPE, "ghost").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 75);
}

#[tokio::test]
async fn test_clear_scope_removes_both_collections() {
    let (store, _tmp) = test_store();

    let quiz = store.add_quiz(SCOPE, sample_quiz("Math")).await.unwrap();
    let result = store.add_result(SCOPE, sample_result(&quiz.id, 100)).await.unwrap();

    store.clear_scope(SCOPE).await.unwrap();

    assert!(store.get_quiz_by_id(SCOPE, &quiz.id).await.is_none());
    assert!(store.get_result_by_id(SCOPE, &result.id).await.is_none());
    assert!(store.list_quizzes(SCOPE).await.is_empty());
}

#[tokio::test]
async fn test_scopes_are_isolated() {
    let (store, _tmp) = test_store();

    let quiz = store.add_quiz("scope-a", sample_quiz("Math")).await.unwrap();
    assert!(store.get_quiz_by_id("scope-b", &quiz.id).await.is_none());
}

#[tokio::test]
async fn test_corrupt_collection_recovers_as_empty() {
    let tmp = TempDir::new().unwrap();
    let store = QuizDataStore::new(LocalStore::new(tmp.path()));

    let scope_dir = tmp.path().join(SCOPE);
    std::fs::create_dir_all(&scope_dir).unwrap();
    std::fs::write(scope_dir.join("quizzes.json"), b"{not json!").unwrap();

    assert!(store.list_quizzes(SCOPE).await.is_empty());

    // The store stays usable: a fresh append replaces the corrupt slot.
    let quiz = store.add_quiz(SCOPE, sample_quiz("Recovered")).await.unwrap();
    let quizzes = store.list_quizzes(SCOPE).await;
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].id, quiz.id);
}

#[tokio::test]
async fn test_unknown_fields_in_stored_records_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let store = QuizDataStore::new(LocalStore::new(tmp.path()));

    let scope_dir = tmp.path().join(SCOPE);
    std::fs::create_dir_all(&scope_dir).unwrap();
    std::fs::write(
        scope_dir.join("quizzes.json"),
        serde_json::json!([{
            "id": "stored-1",
            "topic": "Legacy",
            "dateCreated": "2025-01-01T00:00:00.000Z",
            "difficulty": "medium",
            "numQuestions": 1,
            "questions": [{
                "id": "q1",
                "questionText": "2+2?",
                "options": ["3", "4"],
                "correctAnswer": "4",
                "hint": "think hard"
            }],
            "schemaVersion": 7
        }])
        .to_string(),
    )
    .unwrap();

    let quiz = store.get_quiz_by_id(SCOPE, "stored-1").await.unwrap();
    assert_eq!(quiz.topic, "Legacy");
    assert_eq!(quiz.questions[0].correct_answer, "4");
    // Records stored before the flag existed default to hand-authored.
    assert!(!quiz.is_ai_generated);
}
