//! The operations exposed to transport adapters.
//!
//! [`FoodService`] is the structured path straight to the store; it is what
//! the tool handlers call. [`CentralService`] adds the free-text entry points
//! driven by the orchestration engine.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ReapConfig;
use crate::error::ReapError;
use crate::fncall::catalog::ToolCatalog;
use crate::fncall::{FnCallRequest, FnCaller};
use crate::food::mapping::{entry_to_record, filter_from_request, record_to_entry};
use crate::food::types::{FoodRecord, GetFoodFilter};
use crate::food::{self, FoodStore, StoreError};
use crate::llm::openai::OpenAiClient;

/// Structured food operations over a [`FoodStore`].
#[derive(Clone)]
pub struct FoodService {
    store: Arc<dyn FoodStore>,
}

impl FoodService {
    pub fn new(store: Arc<dyn FoodStore>) -> Self {
        Self { store }
    }

    /// Run a store call on the blocking pool, abandoning it if `cancel` fires.
    /// An already-cancelled token never reaches the store.
    async fn run_blocking<T, F>(&self, cancel: &CancellationToken, op: F) -> Result<T, ReapError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn FoodStore) -> Result<T, StoreError> + Send + 'static,
    {
        if cancel.is_cancelled() {
            return Err(ReapError::Cancelled);
        }

        let store = Arc::clone(&self.store);
        let task = tokio::task::spawn_blocking(move || op(store.as_ref()));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ReapError::Cancelled),
            joined = task => joined
                .map_err(|e| ReapError::Internal(format!("store task failed: {e}")))?
                .map_err(ReapError::from),
        }
    }

    /// Persist `record` and return it as re-read from the store.
    ///
    /// The description must be non-blank; this is checked before the store is
    /// touched.
    pub async fn create_food_record(
        &self,
        record: FoodRecord,
        cancel: &CancellationToken,
    ) -> Result<FoodRecord, ReapError> {
        if record.description.trim().is_empty() {
            return Err(ReapError::InvalidRequest(
                "food record description must not be empty".into(),
            ));
        }

        let mut entry = record_to_entry(&record)?;
        if entry.id.is_nil() {
            entry.id = uuid::Uuid::now_v7();
        }
        if entry.created_at.is_none() {
            entry.created_at = Some(chrono::Utc::now());
        }
        let id = entry.id;

        tracing::info!(id = %id, user_id = %entry.user_id, name = %entry.name, "creating food record");

        let stored = self
            .run_blocking(cancel, move |store| {
                store.create(entry)?;
                store.get_by_id(id)
            })
            .await?;

        Ok(entry_to_record(&stored))
    }

    /// Every record of `user_id` that satisfies `filter`.
    pub async fn get_food_records(
        &self,
        user_id: &str,
        filter: &GetFoodFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<FoodRecord>, ReapError> {
        let filter = filter_from_request(filter, user_id)?;

        let entries = self
            .run_blocking(cancel, move |store| store.get_by_filter(&filter))
            .await?;

        tracing::info!(user_id, found = entries.len(), "food records fetched");
        Ok(entries.iter().map(entry_to_record).collect())
    }
}

/// Entry point for every exposed operation.
#[derive(Clone)]
pub struct CentralService {
    food: FoodService,
    fn_caller: FnCaller,
}

impl CentralService {
    pub fn new(food: FoodService, fn_caller: FnCaller) -> Self {
        Self { food, fn_caller }
    }

    /// Build the store, tool catalog and completion client from config.
    pub fn from_config(config: &ReapConfig) -> anyhow::Result<Self> {
        let store = food::create_store(&config.storage)?;
        tracing::info!(backend = %config.storage.backend, "food store ready");

        let catalog = Arc::new(ToolCatalog::new()?);
        let client = Arc::new(OpenAiClient::new(&config.completion)?);
        let fn_caller = FnCaller::new(client, catalog, config.completion.model.clone())
            .with_seed(config.completion.seed);

        Ok(Self::new(FoodService::new(store), fn_caller))
    }

    /// Free-text input answered through structured output parsing. Not built.
    pub async fn action_user_input(
        &self,
        user_input: &str,
        _cancel: &CancellationToken,
    ) -> Result<String, ReapError> {
        tracing::warn!(input_len = user_input.len(), "action_user_input is not implemented");
        Err(ReapError::NotImplemented("action user input"))
    }

    /// Free-text input for `user_id`, run through the tool-calling engine.
    pub async fn call_fn_user_input(
        &self,
        user_input: &str,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ReapError> {
        if user_input.trim().is_empty() {
            return Err(ReapError::InvalidRequest("user input must not be empty".into()));
        }

        let request = FnCallRequest::new(user_id, user_input);
        let response = self
            .fn_caller
            .enact_user_input(&request, &self.food, cancel)
            .await?;
        Ok(response.message)
    }

    pub async fn create_food_record(
        &self,
        record: FoodRecord,
        cancel: &CancellationToken,
    ) -> Result<FoodRecord, ReapError> {
        self.food.create_food_record(record, cancel).await
    }

    pub async fn get_food_records(
        &self,
        user_id: &str,
        filter: &GetFoodFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<FoodRecord>, ReapError> {
        self.food.get_food_records(user_id, filter, cancel).await
    }
}
