/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Greets from the calling thread, then from one spawned worker.

use std::time::Instant;

use tracing::debug;
use tracing::info_span;
use tracing::warn;

use crate::error::RunError;
use crate::greeting::Sink;
use crate::greeting::StdoutSink;
use crate::greeting::print_hello_routine;
use crate::id::ThreadNum;
use crate::spawner::OsSpawner;
use crate::spawner::Spawner;
use crate::status::StatusCode;
use crate::summary::RunSummary;

/// Runs the two-thread greeting.
///
/// Thread #0 is the calling thread and greets synchronously. Only thread #1
/// is spawned. A failure at either the spawn or the join ends the run right
/// away; nothing is retried.
#[derive(Clone, Debug, Default)]
pub struct Runner<S = OsSpawner, W = StdoutSink> {
    spawner: S,
    sink: W,
}

impl Runner {
    /// A runner that spawns real threads and greets on stdout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Spawner, W: Sink> Runner<S, W> {
    pub fn with(spawner: S, sink: W) -> Self {
        Self { spawner, sink }
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Runs once and returns how it went.
    pub fn run(&self) -> StatusCode {
        self.run_with_summary().status
    }

    /// Runs once and returns the full summary of the run.
    pub fn run_with_summary(&self) -> RunSummary {
        let span = info_span!("run");
        let _enter = span.enter();

        let start = Instant::now();
        let mut summary = RunSummary::default();
        match self.try_run(&mut summary) {
            Ok(()) => summary.set_status(StatusCode::Success),
            Err(err) => {
                warn!("{}", err);
                summary.set_status(err.status());
                summary.failure = Some(err.to_string());
            }
        }
        summary.realtime_elapsed = Some(start.elapsed());
        debug!("run finished: {}", summary.status);
        summary
    }

    fn try_run(&self, summary: &mut RunSummary) -> Result<(), RunError> {
        print_hello_routine(&self.sink, ThreadNum::MAIN);

        let num = ThreadNum::WORKER;
        let sink = self.sink.clone();
        let handle = self
            .spawner
            .spawn(num, move || print_hello_routine(&sink, num))?;
        summary.threads_spawned += 1;
        debug!("spawned worker thread #{}", num);

        handle.join()?;
        summary.threads_joined += 1;
        debug!("joined worker thread #{}", num);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::greeting::BufferSink;
    use crate::spawner::FaultPoint;
    use crate::spawner::FaultySpawner;

    const BOTH: [&str; 2] = ["Hello from thread #0", "Hello from thread #1"];

    #[test]
    fn greets_from_both_threads_in_order() {
        let runner = Runner::with(OsSpawner, BufferSink::new());
        assert_eq!(runner.run(), StatusCode::Success);
        assert_eq!(runner.sink().lines(), BOTH);
    }

    #[test]
    fn repeated_runs_look_the_same() {
        for _ in 0..20 {
            let runner = Runner::with(OsSpawner, BufferSink::new());
            assert_eq!(runner.run(), StatusCode::Success);
            assert_eq!(runner.sink().lines(), BOTH);
        }
    }

    #[test]
    fn spawn_failure_stops_after_first_greeting() {
        let runner = Runner::with(FaultySpawner::new(FaultPoint::Spawn), BufferSink::new());
        let summary = runner.run_with_summary();
        assert_eq!(summary.status, StatusCode::SpawnFailed);
        assert_eq!(summary.code, 1);
        assert_eq!(summary.threads_spawned, 0);
        assert_eq!(summary.threads_joined, 0);
        assert_eq!(runner.sink().lines(), ["Hello from thread #0"]);
    }

    #[test]
    fn join_failure_still_greets_twice() {
        let runner = Runner::with(FaultySpawner::new(FaultPoint::Join), BufferSink::new());
        let summary = runner.run_with_summary();
        assert_eq!(summary.status, StatusCode::JoinFailed);
        assert_eq!(summary.code, 2);
        assert_eq!(summary.threads_spawned, 1);
        assert_eq!(summary.threads_joined, 0);
        assert_eq!(
            summary.failure.as_deref(),
            Some("failed to join thread #1: injected join fault")
        );
        assert_eq!(runner.sink().lines(), BOTH);
    }

    /// A sink whose worker-side writes blow up.
    #[derive(Clone, Default)]
    struct PanicOnWorker(BufferSink);

    impl Write for PanicOnWorker {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if data.starts_with(b"Hello from thread #1") {
                panic!("cannot greet");
            }
            self.0.write(data)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Sink for PanicOnWorker {
        type Writer = PanicOnWorker;

        fn writer(&self) -> PanicOnWorker {
            self.clone()
        }
    }

    #[test]
    fn panicking_worker_is_a_join_failure() {
        let runner = Runner::with(OsSpawner, PanicOnWorker::default());
        let summary = runner.run_with_summary();
        assert_eq!(summary.status, StatusCode::JoinFailed);
        assert_eq!(summary.threads_spawned, 1);
        assert!(
            summary
                .failure
                .as_deref()
                .is_some_and(|f| f.contains("cannot greet")),
            "{:?}",
            summary.failure
        );
        assert_eq!(runner.sink().0.lines(), ["Hello from thread #0"]);
    }

    #[test]
    fn summary_of_a_good_run() {
        let summary = Runner::with(OsSpawner, BufferSink::new()).run_with_summary();
        assert_eq!(summary.status, StatusCode::Success);
        assert_eq!(summary.failure, None);
        assert_eq!(summary.threads_spawned, 1);
        assert_eq!(summary.threads_joined, 1);
        assert!(summary.realtime_elapsed.is_some());
    }
}
