// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request/response envelope for running an engine behind a message channel.
//!
//! ```text
//! request  {"id": .., "type": "search" | "index" | "suggest" | "stats", "payload": {..}}
//! response {"id": .., "type": "success" | "error" | "progress",         "payload": {..}}
//! ```
//!
//! A [`Worker`] owns one engine and handles one request at a time, which is
//! exactly the serialization the engine needs. Every request gets exactly one
//! `success` or `error` response; batch indexing may send `progress`
//! responses before it. Nothing a client sends can make the worker panic.

use crate::engine::SearchEngine;
use crate::error::{Result, SearchError};
use crate::index::validate;
use crate::types::{Document, SearchOptions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Documents indexed between two `progress` responses.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

// =============================================================================
// ENVELOPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Echoed back on every response; any JSON value.
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Success,
    Error,
    Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Value,
    #[serde(rename = "type")]
    pub kind: ResponseType,
    pub payload: Value,
}

impl Response {
    pub fn success(id: Value, payload: Value) -> Self {
        Response {
            id,
            kind: ResponseType::Success,
            payload,
        }
    }

    pub fn error(id: Value, message: impl Into<String>) -> Self {
        Response {
            id,
            kind: ResponseType::Error,
            payload: json!({ "message": message.into() }),
        }
    }

    pub fn progress(id: Value, indexed: usize, total: usize) -> Self {
        Response {
            id,
            kind: ResponseType::Progress,
            payload: json!({ "indexed": indexed, "total": total }),
        }
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// `index` payload, discriminated by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum IndexPayload {
    Add { document: Document },
    Update { document: Document },
    Remove { id: String },
    AddMany { documents: Vec<Document> },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub query: String,
    /// Partial `SearchOptions`. Top-level keys given here replace the worker
    /// engine's defaults; missing ones keep them. `filters` is replaced
    /// whole, not merged key by key.
    #[serde(default)]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestPayload {
    pub prefix: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

fn decode<T: DeserializeOwned>(request: &str, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| SearchError::InvalidPayload {
        request: request.to_string(),
        reason: err.to_string(),
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|err| SearchError::Encode(err.to_string()))
}

// =============================================================================
// WORKER
// =============================================================================

/// Serves envelope requests against one engine.
#[derive(Debug)]
pub struct Worker {
    engine: SearchEngine,
    progress_interval: usize,
}

impl Default for Worker {
    fn default() -> Self {
        Worker::new(SearchEngine::new())
    }
}

impl Worker {
    pub fn new(engine: SearchEngine) -> Self {
        Worker {
            engine,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Documents per `progress` response during `addMany`; 0 disables them.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Handle one request. `emit` receives every response, the final
    /// `success`/`error` last.
    pub fn handle(&mut self, request: Request, mut emit: impl FnMut(Response)) {
        let Request { id, kind, payload } = request;
        let _span = tracing::debug_span!("request", kind = kind.as_str()).entered();

        let outcome = match kind.as_str() {
            "search" => self.search(payload),
            "index" => self.index(&id, payload, &mut emit),
            "suggest" => self.suggest(payload),
            "stats" => encode(&self.engine.stats()),
            _ => Err(SearchError::UnknownRequestType(kind.clone())),
        };

        match outcome {
            Ok(payload) => emit(Response::success(id, payload)),
            Err(err) => {
                tracing::debug!(error = %err, "request failed");
                emit(Response::error(id, err.to_string()));
            }
        }
    }

    /// Handle one JSON-encoded request. A line that isn't a request gets an
    /// `error` response with a null id.
    pub fn handle_line(&mut self, line: &str, mut emit: impl FnMut(Response)) {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request, emit),
            Err(err) => emit(Response::error(
                Value::Null,
                format!("malformed request: {}", err),
            )),
        }
    }

    fn search(&self, payload: Value) -> Result<Value> {
        let SearchPayload { query, options } = decode("search", payload)?;
        let options = match options {
            None | Some(Value::Null) => self.engine.default_options().clone(),
            Some(overrides) => self.merged_options(overrides)?,
        };
        encode(&self.engine.search_detailed(&query, &options))
    }

    /// Engine defaults with `overrides` laid over them, one key at a time.
    fn merged_options(&self, overrides: Value) -> Result<SearchOptions> {
        let Value::Object(overrides) = overrides else {
            return Err(SearchError::InvalidPayload {
                request: "search".to_string(),
                reason: "options must be an object".to_string(),
            });
        };
        let mut merged = encode(self.engine.default_options())?;
        if let Value::Object(base) = &mut merged {
            base.extend(overrides);
        }
        decode("search", merged)
    }

    fn suggest(&self, payload: Value) -> Result<Value> {
        let SuggestPayload { prefix, limit } = decode("suggest", payload)?;
        encode(&self.engine.suggestions(&prefix, limit))
    }

    fn index(&mut self, id: &Value, payload: Value, emit: &mut impl FnMut(Response)) -> Result<Value> {
        match decode("index", payload)? {
            IndexPayload::Add { document } => {
                self.engine.add_document(document)?;
                Ok(json!({ "indexed": 1 }))
            }
            IndexPayload::Update { document } => {
                self.engine.update_document(document)?;
                Ok(json!({ "indexed": 1 }))
            }
            IndexPayload::Remove { id } => {
                let removed = self.engine.remove_document(&id);
                Ok(json!({ "removed": removed }))
            }
            IndexPayload::AddMany { documents } => self.add_many(id, documents, emit),
            IndexPayload::Clear => {
                self.engine.clear();
                Ok(json!({ "cleared": true }))
            }
        }
    }

    fn add_many(
        &mut self,
        id: &Value,
        documents: Vec<Document>,
        emit: &mut impl FnMut(Response),
    ) -> Result<Value> {
        // Whole batch or nothing, same as `SearchEngine::add_documents`.
        documents.iter().try_for_each(validate)?;

        let total = documents.len();
        if self.progress_interval == 0 {
            self.engine.add_documents(documents)?;
            return Ok(json!({ "indexed": total }));
        }

        let mut indexed = 0;
        let mut pending = documents.into_iter().peekable();
        while pending.peek().is_some() {
            let chunk: Vec<Document> = pending.by_ref().take(self.progress_interval).collect();
            indexed += self.engine.add_documents(chunk)?;
            if indexed < total {
                emit(Response::progress(id.clone(), indexed, total));
            }
        }
        Ok(json!({ "indexed": indexed }))
    }
}
