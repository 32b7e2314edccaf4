//! Dispatcher — maps a writing request to exactly one toolkit operation and
//! wraps the outcome in the response envelope.
//!
//! Operations degrade on their own (backend and parse failures come back as
//! well-formed results). The only errors surfaced here are an unknown
//! `promptType` and a fault escaping an operation, such as a panic.

use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::assistant::request::WritingRequest;
use crate::toolkit::{PromptToolkit, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Refine,
    Outline,
    Proofread,
    Chat,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Refine => "refine",
            Tool::Outline => "outline",
            Tool::Proofread => "proofread",
            Tool::Chat => "chat",
        }
    }
}

/// External `promptType` values and the tool each selects.
/// A missing `promptType` selects chat and is deliberately not listed.
pub const PROMPT_TYPES: &[(&str, Tool)] = &[
    ("refine", Tool::Refine),
    ("proofread", Tool::Proofread),
    ("outline", Tool::Outline),
];

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid promptType: {0}")]
    InvalidPromptType(String),

    #[error("The {tool} tool failed unexpectedly: {message}")]
    ToolPanicked { tool: &'static str, message: String },

    #[error("The {0} tool was cancelled before completing")]
    ToolCancelled(&'static str),
}

impl DispatchError {
    fn from_join(tool: Tool, err: JoinError) -> Self {
        if !err.is_panic() {
            return DispatchError::ToolCancelled(tool.as_str());
        }
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        DispatchError::ToolPanicked {
            tool: tool.as_str(),
            message,
        }
    }
}

/// Resolves a `promptType` to a tool. `None` means chat.
pub fn resolve_tool(prompt_type: Option<&str>) -> Result<Tool, DispatchError> {
    let Some(prompt_type) = prompt_type else {
        return Ok(Tool::Chat);
    };
    PROMPT_TYPES
        .iter()
        .find(|(name, _)| *name == prompt_type)
        .map(|(_, tool)| *tool)
        .ok_or_else(|| DispatchError::InvalidPromptType(prompt_type.to_string()))
}

/// Every `promptType` value the dispatcher accepts.
pub fn available_tools() -> Vec<String> {
    PROMPT_TYPES
        .iter()
        .map(|(name, _)| name.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistData {
    pub result: ToolResult,
    pub tool_used: String,
    pub profile_used: String,
}

/// Uniform response body. Always sent with HTTP 200; callers inspect `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        data: AssistData,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        available_tools: Option<Vec<String>>,
    },
}

impl Envelope {
    pub fn success(result: ToolResult, tool: Tool, persona: String) -> Self {
        Envelope::Success {
            data: AssistData {
                result,
                tool_used: tool.as_str().to_string(),
                profile_used: persona,
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error {
            message: message.into(),
            available_tools: None,
        }
    }

    fn from_dispatch_error(err: &DispatchError) -> Self {
        let available_tools = match err {
            DispatchError::InvalidPromptType(_) => Some(available_tools()),
            _ => None,
        };
        Envelope::Error {
            message: err.to_string(),
            available_tools,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Dispatcher {
    toolkit: PromptToolkit,
}

impl Dispatcher {
    pub fn new(toolkit: PromptToolkit) -> Self {
        Self { toolkit }
    }

    /// Handles one request end to end. Never fails: every outcome is an envelope.
    pub async fn dispatch(&self, request: WritingRequest) -> Envelope {
        let tool = match resolve_tool(request.prompt_type()) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("Rejected writing request: {e}");
                return Envelope::from_dispatch_error(&e);
            }
        };

        let persona = request.profile.persona.clone();
        info!(tool = tool.as_str(), persona = %persona, "Dispatching writing request");

        match self.run(tool, request).await {
            Ok(result) => Envelope::success(result, tool, persona),
            Err(e) => {
                error!(tool = tool.as_str(), "Writing request failed: {e}");
                Envelope::from_dispatch_error(&e)
            }
        }
    }

    /// Runs the operation on its own task so a panic inside it is contained
    /// and reported instead of tearing down the connection.
    async fn run(&self, tool: Tool, request: WritingRequest) -> Result<ToolResult, DispatchError> {
        let toolkit = self.toolkit.clone();
        tokio::spawn(async move { execute(&toolkit, tool, &request).await })
            .await
            .map_err(|e| DispatchError::from_join(tool, e))
    }
}

async fn execute(toolkit: &PromptToolkit, tool: Tool, request: &WritingRequest) -> ToolResult {
    let profile = &request.profile;
    match tool {
        Tool::Refine => ToolResult::Refine(
            toolkit
                .refine(&request.draft_content, profile, &request.message)
                .await,
        ),
        Tool::Outline => ToolResult::Outline(
            toolkit
                .outline(
                    request.topic_name(),
                    profile,
                    &request.outline_context(),
                    &request.message,
                )
                .await,
        ),
        Tool::Proofread => ToolResult::Proofread(
            toolkit
                .proofread(&request.draft_content, profile, &request.message)
                .await,
        ),
        Tool::Chat => ToolResult::Chat(
            toolkit
                .chat(&request.message, profile, &request.chat_context())
                .await,
        ),
    }
}
