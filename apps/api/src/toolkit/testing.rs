//! Test doubles for the completion backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::llm_client::{CompletionBackend, LlmError};

/// Records every prompt it receives and answers with a canned reply or failure.
pub struct RecordingBackend {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Every call fails with an API error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("backend was never called")
    }
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn predict(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 529,
                message: message.clone(),
            }),
        }
    }
}

/// Panics on every call; stands in for a fault escaping an operation.
pub struct PanickingBackend;

#[async_trait]
impl CompletionBackend for PanickingBackend {
    async fn predict(&self, _prompt: &str) -> Result<String, LlmError> {
        panic!("backend exploded");
    }
}
