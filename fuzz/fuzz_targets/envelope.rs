// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the request envelope.
//!
//! Whatever arrives on the wire, the worker answers every line with exactly
//! one terminal `success` or `error` response, and never panics.

#![no_main]

use kbsearch::protocol::{ResponseType, Worker};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut worker = Worker::default().with_progress_interval(2);

    for line in text.lines().take(16) {
        let mut terminal = 0;
        let mut last_terminal = false;
        worker.handle_line(line, |response| {
            last_terminal = response.kind != ResponseType::Progress;
            if last_terminal {
                terminal += 1;
            }
            assert!(serde_json::to_string(&response).is_ok());
        });
        assert_eq!(terminal, 1);
        assert!(last_terminal);
    }
});
