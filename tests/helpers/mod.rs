#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use reap::central::FoodService;
use reap::fncall::catalog::ToolCatalog;
use reap::fncall::FnCaller;
use reap::food::indexed::IndexedFoodStore;
use reap::food::memory::InMemoryFoodStore;
use reap::food::types::{FoodFilter, FoodRecordEntry};
use reap::food::{FoodStore, StoreError};
use reap::llm::{AssistantTurn, CompletionClient, CompletionRequest, LlmError, ToolCall};
use uuid::Uuid;

/// Completion client that replays scripted turns and records every request.
#[derive(Default)]
pub struct ScriptedClient {
    turns: Mutex<VecDeque<AssistantTurn>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new(turns: Vec<AssistantTurn>) -> Arc<Self> {
        Arc::new(Self {
            turns: Mutex::new(turns.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<AssistantTurn, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Completion client that never answers.
pub struct StalledClient;

#[async_trait::async_trait]
impl CompletionClient for StalledClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<AssistantTurn, LlmError> {
        std::future::pending().await
    }
}

/// A turn that only carries text.
pub fn text_turn(text: &str) -> AssistantTurn {
    AssistantTurn {
        content: Some(text.to_string()),
        tool_calls: Vec::new(),
    }
}

/// A turn that requests the given `(call id, tool name, arguments)` calls.
pub fn tool_turn(calls: &[(&str, &str, &str)]) -> AssistantTurn {
    AssistantTurn {
        content: None,
        tool_calls: calls
            .iter()
            .map(|(id, name, args)| ToolCall::function(*id, *name, *args))
            .collect(),
    }
}

pub fn fn_caller(client: Arc<dyn CompletionClient>) -> FnCaller {
    FnCaller::new(client, Arc::new(ToolCatalog::new().unwrap()), "test-model")
}

pub fn memory_service() -> (Arc<InMemoryFoodStore>, FoodService) {
    let store = Arc::new(InMemoryFoodStore::new());
    let service = FoodService::new(store.clone());
    (store, service)
}

/// Indexed store over a fresh in-memory SQLite database.
pub fn indexed_store() -> IndexedFoodStore {
    let conn = reap::db::open_memory_database().unwrap();
    IndexedFoodStore::new(conn).unwrap()
}

pub fn user() -> Uuid {
    Uuid::now_v7()
}

/// Store wrapper that counts every call reaching the backend.
pub struct CountingStore {
    inner: InMemoryFoodStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryFoodStore::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl FoodStore for CountingStore {
    fn create(&self, entry: FoodRecordEntry) -> Result<(), StoreError> {
        self.hit();
        self.inner.create(entry)
    }

    fn get_by_id(&self, id: Uuid) -> Result<FoodRecordEntry, StoreError> {
        self.hit();
        self.inner.get_by_id(id)
    }

    fn get_by_filter(&self, filter: &FoodFilter) -> Result<Vec<FoodRecordEntry>, StoreError> {
        self.hit();
        self.inner.get_by_filter(filter)
    }

    fn update(&self, entry: FoodRecordEntry) -> Result<(), StoreError> {
        self.hit();
        self.inner.update(entry)
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.hit();
        self.inner.delete(id)
    }
}
