/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use threaded_hello::Context;
use threaded_hello::Error;
use threaded_hello::FaultPoint;
use threaded_hello::FaultySpawner;
use threaded_hello::RunSummary;
use threaded_hello::Runner;
use threaded_hello::Spawner;
use threaded_hello::StatusCode;
use threaded_hello::StdoutSink;
use tracing::info;

// How many times to run, and what to report afterwards. Not a doc comment:
// this is flattened into `Args`, whose help text comes from `GlobalOpts`.
#[derive(Debug, Parser, Clone)]
pub struct RunOpts {
    /// Run this many times in a row. Stops early at the first run that does
    /// not succeed.
    #[clap(long, value_name = "N", default_value = "1")]
    pub repeat: NonZeroUsize,

    /// Print a summary of the last run to stderr before exiting.
    #[clap(long)]
    pub summary: bool,

    /// Write the summary of the last run as JSON to this file.
    #[clap(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Make the given step of every run fail (spawn|join).
    #[clap(long, value_name = "STEP", hide = true)]
    pub inject_fault: Option<FaultPoint>,
}

impl RunOpts {
    pub fn main(&self) -> Result<StatusCode, Error> {
        let summary = match self.inject_fault {
            None => self.run_repeatedly(&Runner::new()),
            Some(fault) => {
                info!("injecting a {} fault", fault);
                self.run_repeatedly(&Runner::with(FaultySpawner::new(fault), StdoutSink))
            }
        };

        if self.summary {
            eprintln!(
                "\n------------------------------ threaded-hello run report ------------------------------\n{}",
                summary
            );
        }

        if let Some(path) = &self.summary_json {
            let file = File::create(path)
                .with_context(|| format!("Failed to create summary file {:?}", path))?;
            serde_json::to_writer_pretty(file, &summary)
                .context("Failed to serialize run summary")?;
        }

        Ok(summary.status)
    }

    /// Returns the summary of the last run performed.
    fn run_repeatedly<S: Spawner>(&self, runner: &Runner<S, StdoutSink>) -> RunSummary {
        let mut round = 1;
        loop {
            let summary = runner.run_with_summary();
            if !summary.status.is_success() || round == self.repeat.get() {
                info!("stopping after {} run(s) with status {}", round, summary.status);
                return summary;
            }
            round += 1;
        }
    }
}
