/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The outcome of a single run.

use std::fmt;
use std::process::ExitCode;

use serde::Deserialize;
use serde::Serialize;

/// How a run ended. The discriminant is the integer status reported to
/// callers and used as the process exit code.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum StatusCode {
    /// Both threads greeted and the worker was joined.
    Success = 0,
    /// The worker thread could not be created.
    SpawnFailed = 1,
    /// The worker thread was created but joining it failed.
    JoinFailed = 2,
}

impl StatusCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

impl From<StatusCode> for ExitCode {
    fn from(status: StatusCode) -> Self {
        // All codes are small and non-negative.
        ExitCode::from(status.code() as u8)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StatusCode::Success => "success",
            StatusCode::SpawnFailed => "spawn failed",
            StatusCode::JoinFailed => "join failed",
        };
        write!(f, "{} ({})", name, self.code())
    }
}
