/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Summaries of complete runs.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::status::StatusCode;

/// Statistics that summarize one run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// How the run ended.
    pub status: StatusCode,

    /// The integer form of `status`.
    pub code: i32,

    /// The error that ended the run, if any.
    pub failure: Option<String>,

    /// Worker threads the spawner actually created.
    pub threads_spawned: u64,
    /// Worker threads joined successfully.
    pub threads_joined: u64,

    /// [Nondeterministic] Realtime, i.e. wall-clock time elapsed.
    pub realtime_elapsed: Option<Duration>,
}

impl Default for RunSummary {
    fn default() -> Self {
        RunSummary {
            status: StatusCode::Success,
            code: StatusCode::Success.code(),
            failure: None,
            threads_spawned: 0,
            threads_joined: 0,
            realtime_elapsed: None,
        }
    }
}

impl RunSummary {
    pub(crate) fn set_status(&mut self, status: StatusCode) {
        self.status = status;
        self.code = status.code();
    }
}

/// A human-readable, multi-line summary.
impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RunSummary {
            status,
            code: _,
            failure,
            threads_spawned,
            threads_joined,
            realtime_elapsed,
        } = self;
        writeln!(f, "Run finished with status: {}", status)?;
        if let Some(txt) = failure {
            writeln!(f, "Cause: {}", txt)?;
        }
        writeln!(
            f,
            "Spawned {} worker thread(s), joined {}.",
            threads_spawned, threads_joined
        )?;
        if let Some(rt) = realtime_elapsed {
            writeln!(f, "Nondeterministic realtime elapsed: {:?}", rt)?
        };
        Ok(())
    }
}
