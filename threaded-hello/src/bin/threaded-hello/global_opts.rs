/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use threaded_hello::Context;
use threaded_hello::Error;
use tracing::metadata::LevelFilter;

use super::tracing::init_file_tracing;
use super::tracing::init_stderr_tracing;

/// Greets from the calling thread, then from one spawned worker thread, and
/// waits for the worker to finish.
///
/// The exit code is 0 when both threads greeted and the worker was joined, 1
/// when the worker could not be spawned and 2 when it could not be joined.
///
/// Below are options that control logging.
#[derive(Debug, Parser, Clone)]
pub struct GlobalOpts {
    /// The verbosity level of log output.
    #[clap(short, long, value_name = "LEVEL", env = "THREADED_HELLO_LOG")]
    pub log: Option<LevelFilter>,

    /// Log to a file instead of the terminal.
    #[clap(long, value_name = "FILE", env = "THREADED_HELLO_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Initalizes tracing. The returned guard must be held until logging is
    /// done, or buffered file output may be lost.
    #[must_use = "This function returns a guard that should not be immediately dropped"]
    pub fn init_tracing(&self) -> Result<Option<impl Drop + use<>>, Error> {
        if let Some(path) = &self.log_file {
            let file_writer = File::create(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            let guard =
                init_file_tracing(self.log, file_writer).context("Failed to install tracing")?;
            Ok(Some(guard))
        } else {
            init_stderr_tracing(self.log).context("Failed to install tracing")?;
            Ok(None)
        }
    }
}
