//! Reap: a diary assistant that turns free-text food and exercise notes into
//! structured records through LLM tool calling.
//!
//! One utterance ("I had 500 calories of chicken") goes through a two-round
//! conversation with a chat-completion service. The model picks tools from a
//! fixed catalog, the engine runs them against a pluggable food store, and the
//! model's second answer is returned to the user.
//!
//! # Architecture
//!
//! - **Engine**: [`fncall::FnCaller`] drives the tool-calling protocol over any
//!   [`llm::CompletionClient`]
//! - **Storage**: [`food::FoodStore`] with an in-memory backend and a SQLite
//!   document backend searched through an FTS5 index
//! - **Transport**: MCP over stdio or Streamable HTTP (binary only)
//!
//! # Modules
//!
//! - [`central`] — The exposed operations: free-text input and direct record access
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite connection setup and document schema
//! - [`error`] — Service-level error taxonomy
//! - [`fncall`] — Tool catalog, tool handlers and the orchestration engine
//! - [`food`] — Food record model, unit conversion, mapping and stores
//! - [`llm`] — Completion service contract and OpenAI-compatible client

pub mod central;
pub mod config;
pub mod db;
pub mod error;
pub mod fncall;
pub mod food;
pub mod llm;
