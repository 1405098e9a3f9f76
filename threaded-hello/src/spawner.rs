/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Creating and joining the worker thread.
//!
//! [`OsSpawner`] asks the operating system for a real thread. [`FaultySpawner`]
//! does the same but makes a chosen step fail, so the failure paths of a run
//! can be exercised on a healthy machine.

use std::fmt;
use std::io;
use std::str::FromStr;
use std::thread;
use std::thread::JoinHandle;

use tracing::debug;
use tracing::trace;

use crate::consts::WORKER_THREAD_NAME;
use crate::error::RunError;
use crate::id::ThreadNum;

/// Something that can start a thread running `entry`.
pub trait Spawner {
    fn spawn<F>(&self, num: ThreadNum, entry: F) -> Result<ThreadHandle, RunError>
    where
        F: FnOnce() + Send + 'static;
}

/// A spawned thread that has not been joined yet.
///
/// Dropping the handle joins the thread, so no path out of a run leaves a
/// thread running behind it. [`ThreadHandle::join`] consumes the handle and
/// reports how the join went.
pub struct ThreadHandle {
    num: ThreadNum,
    inner: Option<JoinHandle<()>>,
    fail_join: bool,
}

impl ThreadHandle {
    pub fn new(num: ThreadNum, inner: JoinHandle<()>) -> Self {
        Self {
            num,
            inner: Some(inner),
            fail_join: false,
        }
    }

    /// Makes the eventual join report failure after the thread has finished.
    pub(crate) fn fail_on_join(mut self) -> Self {
        self.fail_join = true;
        self
    }

    /// Blocks until the thread terminates.
    pub fn join(mut self) -> Result<(), RunError> {
        let num = self.num;
        // `inner` is only taken here and in `drop`, both of which consume the
        // handle, so it is always present.
        let joined = self.inner.take().map(JoinHandle::join);
        trace!("thread #{} terminated", num);

        if self.fail_join {
            return Err(RunError::Join {
                num,
                reason: "injected join fault".to_string(),
            });
        }
        match joined {
            Some(Err(payload)) => Err(RunError::from_panic(num, payload)),
            Some(Ok(())) | None => Ok(()),
        }
    }
}

impl fmt::Debug for ThreadHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ThreadHandle")
            .field("num", &self.num)
            .field("joined", &self.inner.is_none())
            .finish()
    }
}

impl Drop for ThreadHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            debug!("joining thread #{} on drop", self.num);
            let _ = inner.join();
        }
    }
}

/// Spawns real, named OS threads.
#[derive(Copy, Clone, Debug, Default)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    fn spawn<F>(&self, num: ThreadNum, entry: F) -> Result<ThreadHandle, RunError>
    where
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new()
            .name(format!("{}-{}", WORKER_THREAD_NAME, num))
            .spawn(entry)
            .map(|inner| ThreadHandle::new(num, inner))
            .map_err(|source| RunError::Spawn { num, source })
    }
}

/// A step of a run that can be made to fail on purpose.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaultPoint {
    /// Thread creation fails; nothing is spawned.
    Spawn,
    /// The worker runs to completion, then joining it fails.
    Join,
}

impl FromStr for FaultPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spawn" => Ok(FaultPoint::Spawn),
            "join" => Ok(FaultPoint::Join),
            _ => Err(format!("Expected spawn|join, could not parse: {:?}", s)),
        }
    }
}

impl fmt::Display for FaultPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FaultPoint::Spawn => write!(f, "spawn"),
            FaultPoint::Join => write!(f, "join"),
        }
    }
}

/// Spawns real threads like [`OsSpawner`], but fails at `fault`.
#[derive(Copy, Clone, Debug)]
pub struct FaultySpawner {
    fault: FaultPoint,
}

impl FaultySpawner {
    pub fn new(fault: FaultPoint) -> Self {
        Self { fault }
    }
}

impl Spawner for FaultySpawner {
    fn spawn<F>(&self, num: ThreadNum, entry: F) -> Result<ThreadHandle, RunError>
    where
        F: FnOnce() + Send + 'static,
    {
        match self.fault {
            FaultPoint::Spawn => Err(RunError::Spawn {
                num,
                source: io::Error::other("injected spawn fault"),
            }),
            FaultPoint::Join => OsSpawner
                .spawn(num, entry)
                .map(ThreadHandle::fail_on_join),
        }
    }
}
