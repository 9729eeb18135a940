//! Tool-calling orchestration.
//!
//! [`FnCaller`] runs one user utterance through two completion rounds. The
//! first round advertises the [`catalog::ToolCatalog`]; if the model asks for
//! tools, each call is decoded and handled in order, its result appended to
//! the conversation, and a second round produces the reply. Tool calls in the
//! second round are ignored.

pub mod catalog;
pub mod handlers;
pub mod params;
pub mod prompt;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use tokio_util::sync::CancellationToken;

use crate::central::FoodService;
use crate::llm::{AssistantTurn, ChatMessage, CompletionClient, CompletionRequest, LlmError};
use catalog::ToolCatalog;
use handlers::ToolInvocation;
use params::get_food::TIME_FORMAT;

/// Seed sent with every completion unless configured otherwise.
pub const DEFAULT_SEED: i64 = 99;

#[derive(thiserror::Error, Debug)]
pub enum FnCallError {
    #[error("no completion model selected")]
    NoModel,

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("failed to decode arguments for {tool}: {source}")]
    DecodeArguments {
        tool: String,
        source: serde_json::Error,
    },

    #[error("request cancelled")]
    Cancelled,
}

/// One utterance from one user.
#[derive(Debug, Clone, PartialEq)]
pub struct FnCallRequest {
    pub user_id: String,
    pub user_input: String,
    now: DateTime<FixedOffset>,
}

impl FnCallRequest {
    pub fn new(user_id: impl Into<String>, user_input: impl Into<String>) -> Self {
        Self::at(user_id, user_input, Local::now().fixed_offset())
    }

    /// Same as [`FnCallRequest::new`] with an explicit current time.
    pub fn at(
        user_id: impl Into<String>,
        user_input: impl Into<String>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_input: user_input.into(),
            now,
        }
    }

    /// The user turn as sent to the model: context tags then the raw input.
    pub fn wrapped_input(&self) -> String {
        format!(
            "<extra>current date: {}</extra><input>{}</input>",
            self.now.format(TIME_FORMAT),
            self.user_input
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnCallResponse {
    pub message: String,
}

/// The orchestration engine. Holds no per-request state.
#[derive(Clone)]
pub struct FnCaller {
    client: Arc<dyn CompletionClient>,
    catalog: Arc<ToolCatalog>,
    model: String,
    seed: Option<i64>,
}

impl FnCaller {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        catalog: Arc<ToolCatalog>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            catalog,
            model: model.into(),
            seed: Some(DEFAULT_SEED),
        }
    }

    pub fn with_seed(mut self, seed: Option<i64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run the two-round protocol for `request`, applying side effects through
    /// `food`. Returns the model's final text.
    pub async fn enact_user_input(
        &self,
        request: &FnCallRequest,
        food: &FoodService,
        cancel: &CancellationToken,
    ) -> Result<FnCallResponse, FnCallError> {
        if self.model.is_empty() {
            return Err(FnCallError::NoModel);
        }

        let mut messages = vec![
            ChatMessage::developer(prompt::CENTRAL_PROMPT),
            ChatMessage::user(request.wrapped_input()),
        ];

        let first = self.complete(&messages, cancel).await?;
        if first.tool_calls.is_empty() {
            tracing::info!(user_id = %request.user_id, "model answered without tools");
            return Ok(FnCallResponse {
                message: first.text(),
            });
        }

        let calls = first.tool_calls.clone();
        tracing::info!(
            user_id = %request.user_id,
            tool_calls = calls.len(),
            "dispatching tool calls"
        );
        messages.push(first.into_message());

        for call in &calls {
            let invocation = ToolInvocation::decode(&call.function)?;
            tracing::debug!(call_id = %call.id, tool = %call.function.name, "handling tool call");

            let result = handlers::dispatch(invocation, food, &request.user_id, cancel).await;
            if cancel.is_cancelled() {
                return Err(FnCallError::Cancelled);
            }
            messages.push(ChatMessage::tool(
                call.id.clone(),
                handlers::encode_tool_result(&result),
            ));
        }

        let last = self.complete(&messages, cancel).await?;
        if !last.tool_calls.is_empty() {
            tracing::debug!(
                ignored = last.tool_calls.len(),
                "ignoring tool calls in final turn"
            );
        }

        Ok(FnCallResponse {
            message: last.text(),
        })
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        cancel: &CancellationToken,
    ) -> Result<AssistantTurn, FnCallError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            tools: self.catalog.definitions().to_vec(),
            seed: self.seed,
        };
        tracing::debug!(messages = request.messages.len(), "requesting completion");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FnCallError::Cancelled),
            turn = self.client.complete(&request) => Ok(turn?),
        }
    }
}
