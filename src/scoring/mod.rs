// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers and their order.
//!
//! `core` computes a TF-IDF relevance score with a compounding title boost.
//! `ranking` turns a sort key and direction into a comparator.

mod core;
pub mod ranking;

pub use core::*;
