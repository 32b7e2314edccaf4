// Prompt toolkit: one operation per writing task.
// Every operation builds its prompt from the shared style guidance, makes exactly
// one backend call, and turns the reply into a flat, always-well-formed result.
// Backend and parse failures degrade inside the operation; nothing is returned as Err.

pub mod chat;
pub mod outline;
pub mod prompts;
pub mod proofread;
pub mod refine;
pub mod repair;
pub mod style;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use serde::Serialize;

use crate::llm_client::CompletionBackend;

pub use chat::ChatResult;
pub use outline::OutlineResult;
pub use proofread::ProofreadResult;
pub use refine::RefineResult;

/// Output of whichever operation ran. Serialized without a variant tag:
/// callers see the operation's own flat fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Refine(RefineResult),
    Outline(OutlineResult),
    Proofread(ProofreadResult),
    Chat(ChatResult),
}

#[derive(Clone)]
pub struct PromptToolkit {
    backend: Arc<dyn CompletionBackend>,
}

impl PromptToolkit {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}
