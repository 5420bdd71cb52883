//! Question and answer-set data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single follow-up question with a closed set of options.
///
/// Generated as a batch when the preliminary analysis completes;
/// read-only afterward. Options are ordered and unique within the
/// question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within a session.
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `option` is one of this question's options.
    pub fn accepts(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Recorded answers, keyed by question id.
///
/// Starts empty when questions are generated; mutated one entry at a
/// time; frozen once synthesis begins. Backed by a `BTreeMap` so
/// iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Overwrites any prior answer for the question.
    pub fn record(&mut self, question_id: impl Into<String>, option: impl Into<String>) {
        self.answers.insert(question_id.into(), option.into());
    }

    /// The recorded answer for a question, if any.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate `(question_id, answer)` pairs in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
