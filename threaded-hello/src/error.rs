/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::any::Any;
use std::io;

use crate::id::ThreadNum;
use crate::status::StatusCode;

/// Errors of the tool itself (files, logging), as opposed to a failed run.
pub type Error = anyhow::Error;

pub use anyhow::Context;

/// Why a run did not succeed. Each variant corresponds to exactly one
/// non-success [`StatusCode`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The OS refused to create the worker thread.
    #[error("failed to spawn thread #{num}")]
    Spawn {
        num: ThreadNum,
        #[source]
        source: io::Error,
    },

    /// The worker thread could not be joined, e.g. because it panicked.
    #[error("failed to join thread #{num}: {reason}")]
    Join { num: ThreadNum, reason: String },
}

impl RunError {
    /// The status this failure is reported as.
    pub fn status(&self) -> StatusCode {
        match self {
            RunError::Spawn { .. } => StatusCode::SpawnFailed,
            RunError::Join { .. } => StatusCode::JoinFailed,
        }
    }

    /// Builds a join error out of the payload a panicking thread left behind.
    pub(crate) fn from_panic(num: ThreadNum, payload: Box<dyn Any + Send>) -> Self {
        let reason = if let Some(s) = payload.downcast_ref::<&str>() {
            format!("thread panicked: {}", s)
        } else if let Some(s) = payload.downcast_ref::<String>() {
            format!("thread panicked: {}", s)
        } else {
            "thread panicked".to_string()
        };
        RunError::Join { num, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_variant() {
        let spawn = RunError::Spawn {
            num: ThreadNum::WORKER,
            source: io::Error::new(io::ErrorKind::WouldBlock, "no more threads"),
        };
        assert_eq!(spawn.status(), StatusCode::SpawnFailed);
        assert_eq!(spawn.to_string(), "failed to spawn thread #1");

        let join = RunError::Join {
            num: ThreadNum::WORKER,
            reason: "gone".into(),
        };
        assert_eq!(join.status(), StatusCode::JoinFailed);
        assert_eq!(join.to_string(), "failed to join thread #1: gone");
    }

    #[test]
    fn spawn_error_keeps_its_source() {
        let error = Error::from(RunError::Spawn {
            num: ThreadNum::WORKER,
            source: io::Error::new(io::ErrorKind::WouldBlock, "no more threads"),
        });

        assert_eq!(
            error
                .chain()
                .map(ToString::to_string)
                .collect::<Vec<String>>(),
            ["failed to spawn thread #1", "no more threads"]
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>(),
        )
    }

    #[test]
    fn panic_payloads() {
        let err = RunError::from_panic(ThreadNum::WORKER, Box::new("boom"));
        assert_eq!(err.to_string(), "failed to join thread #1: thread panicked: boom");

        let err = RunError::from_panic(ThreadNum::WORKER, Box::new(String::from("bang")));
        assert_eq!(err.to_string(), "failed to join thread #1: thread panicked: bang");

        let err = RunError::from_panic(ThreadNum::WORKER, Box::new(42u8));
        assert_eq!(err.to_string(), "failed to join thread #1: thread panicked");
    }
}
