/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use core::fmt;

/// The number a thread greets with.
///
/// Copied into whichever thread reads it, so it never has to outlive the
/// frame that created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ThreadNum(i32);

impl ThreadNum {
    /// The calling thread, which greets synchronously before anything is spawned.
    pub const MAIN: ThreadNum = ThreadNum(0);

    /// The single worker thread spawned by a run.
    pub const WORKER: ThreadNum = ThreadNum(1);
}

impl fmt::Display for ThreadNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_and_worker_numbers() {
        assert_eq!(ThreadNum::MAIN.to_string(), "0");
        assert_eq!(ThreadNum::WORKER.to_string(), "1");
        assert_ne!(ThreadNum::MAIN, ThreadNum::WORKER);
    }
}
