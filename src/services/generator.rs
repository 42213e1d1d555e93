// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text generator client for quiz generation and result summaries.
//!
//! Calls are gated on the profile holding an API key; the key is passed
//! per request, never stored here. Any failure (network, quota, invalid
//! key) surfaces as one generic `GeneratorApi` error - the caller gets a
//! single failure signal, not a taxonomy.

use crate::error::AppError;
use crate::models::Difficulty;
use serde::Deserialize;

/// Text generator client.
#[derive(Clone)]
pub struct GeneratorClient {
    mode: GeneratorMode,
}

#[derive(Clone)]
enum GeneratorMode {
    Remote {
        http: reqwest::Client,
        base_url: String,
        model: String,
    },
    /// Offline mode for tests: returns a canned completion.
    Mock { canned: String },
}

/// Generate-content response (only the first candidate's text is used).
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

impl GeneratorClient {
    /// Create a client against the given generator base URL and model.
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            mode: GeneratorMode::Remote {
                http: reqwest::Client::new(),
                base_url,
                model,
            },
        }
    }

    /// Create an offline client for testing that completes every request
    /// with `canned`.
    pub fn new_mock(canned: impl Into<String>) -> Self {
        Self {
            mode: GeneratorMode::Mock {
                canned: canned.into(),
            },
        }
    }

    /// Generate raw quiz text for a topic.
    ///
    /// The completion is expected to be a flat JSON object using the
    /// positional key scheme understood by `parser::parse_generated_quiz`.
    pub async fn generate_quiz_text(
        &self,
        api_key: &str,
        topic: &str,
        num_questions: u32,
        difficulty: Difficulty,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "You are a quiz generator. Generate a quiz on the topic of {topic} with \
             {num_questions} questions and a difficulty level of {difficulty}. Return the \
             quiz as a JSON object. Each question should have the question text, possible \
             answers, and the correct answer. Make sure the answer is one of the possible \
             answers provided. The JSON object should be flat and have no nested JSON \
             objects or arrays. Example: {{\"question1\": \"What is the capital of \
             France?\", \"answer1_1\": \"London\", \"answer1_2\": \"Paris\", \"answer1_3\": \
             \"Berlin\", \"correct_answer1\": \"Paris\"}}.",
            topic = topic,
            num_questions = num_questions,
            difficulty = difficulty.as_str(),
        );

        self.complete(api_key, &prompt).await
    }

    /// Summarize a played quiz from the user's and correct answers.
    ///
    /// The score is computed locally by the caller; only the prose
    /// summary comes from the generator.
    pub async fn summarize_results(
        &self,
        api_key: &str,
        quiz_topic: &str,
        user_answers: &[String],
        correct_answers: &[String],
        score: u32,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "You are an AI quiz summarizer. You will take the quiz topic, the user's \
             answers, the correct answers, and the score to generate a short summary of \
             the user's performance.\n\n\
             Quiz Topic: {}\n\
             User Answers: {}\n\
             Correct Answers: {}\n\
             Score: {}%\n\n\
             Summary:",
            quiz_topic,
            user_answers.join(", "),
            correct_answers.join(", "),
            score,
        );

        self.complete(api_key, &prompt).await
    }

    /// Run one completion request and return the first candidate's text.
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, AppError> {
        let (http, base_url, model) = match &self.mode {
            GeneratorMode::Mock { canned } => return Ok(canned.clone()),
            GeneratorMode::Remote {
                http,
                base_url,
                model,
            } => (http, base_url, model),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            base_url, model, api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::GeneratorApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GeneratorApi(format!("HTTP {}: {}", status, body)));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeneratorApi(format!("JSON parse error: {}", e)))?;

        let text = completion
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::GeneratorApi("empty completion".to_string()))?;

        Ok(text)
    }
}
