/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

// Treat all Clippy warnings as errors.
#![deny(clippy::all)]

mod global_opts;
mod run;
mod tracing;

use std::process::ExitCode;

use clap::Parser;
use colored::*;
use threaded_hello::Error;

use self::global_opts::GlobalOpts;
use self::run::RunOpts;

/// Exit code for failures of the tool itself, distinct from every run status.
const TOOL_FAILURE: u8 = 3;

#[derive(Debug, Parser)]
#[clap(name = "threaded-hello", version)]
struct Args {
    #[clap(flatten)]
    global: GlobalOpts,

    #[clap(flatten)]
    run: RunOpts,
}

fn main() -> ExitCode {
    let Args { global, run } = Args::parse();

    let _guard = match global.init_tracing() {
        Ok(guard) => guard,
        Err(err) => {
            display_error(err);
            return ExitCode::from(TOOL_FAILURE);
        }
    };

    match run.main() {
        Ok(status) => status.into(),
        Err(err) => {
            display_error(err);
            ExitCode::from(TOOL_FAILURE)
        }
    }
}

fn display_error(error: Error) {
    let mut chain = error.chain();

    if let Some(error) = chain.next() {
        eprintln!("{}: {}", "Error".red().bold(), error);
    }

    for cause in chain {
        eprintln!("     {} {}", ">".dimmed().bold(), cause);
    }
}
