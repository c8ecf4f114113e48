// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors the engine surfaces to callers.
//!
//! Only malformed input is an error. A term, field or id that isn't in the
//! index is an empty result, and query syntax problems are reported through
//! [`crate::query::ParseOutcome`] instead of failing the search.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Document rejected because its id is empty or blank.
    #[error("document id must not be empty")]
    MissingDocumentId,

    /// Envelope payload didn't match the shape its request type expects.
    #[error("invalid {request} payload: {reason}")]
    InvalidPayload { request: String, reason: String },

    /// Envelope `type` isn't one of search/index/suggest/stats.
    #[error("unknown request type '{0}'")]
    UnknownRequestType(String),

    /// A response payload couldn't be serialized.
    #[error("failed to encode response: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
