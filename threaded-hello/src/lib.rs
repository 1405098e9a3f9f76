/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Minimal thread creation: the calling thread greets, one spawned worker
//! greets, the worker is joined and the outcome is reported as a status code.

// Treat all Clippy warnings as errors.
#![deny(clippy::all)]

mod consts;
mod error;
mod greeting;
mod id;
mod runner;
mod spawner;
mod status;
mod summary;

pub use consts::GREETING;
pub use error::Context;
pub use error::Error;
pub use error::RunError;
pub use greeting::BufferSink;
pub use greeting::Sink;
pub use greeting::StdoutSink;
pub use greeting::greeting;
pub use greeting::print_hello_routine;
pub use id::ThreadNum;
pub use runner::Runner;
pub use spawner::FaultPoint;
pub use spawner::FaultySpawner;
pub use spawner::OsSpawner;
pub use spawner::Spawner;
pub use spawner::ThreadHandle;
pub use status::StatusCode;
pub use summary::RunSummary;

/// Greets from the calling thread and from one spawned thread on stdout,
/// then returns 0 on success, 1 if the thread could not be spawned and 2 if
/// it could not be joined.
///
/// The output is checked by running the `threaded-hello` binary, which takes
/// the same path, see `tests/run_integration.rs`.
pub fn print_hello() -> i32 {
    Runner::new().run().code()
}
