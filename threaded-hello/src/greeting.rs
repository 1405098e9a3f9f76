/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The print routine every thread runs, and the sinks it can write to.

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::consts::GREETING;
use crate::id::ThreadNum;

/// A destination for greetings that can be handed to another thread.
pub trait Sink: Clone + Send + 'static {
    type Writer: Write;

    /// Returns a writer for one greeting.
    fn writer(&self) -> Self::Writer;
}

/// The process's standard output.
#[derive(Copy, Clone, Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    type Writer = io::Stdout;

    fn writer(&self) -> io::Stdout {
        io::stdout()
    }
}

/// An in-memory sink shared by every clone.
#[derive(Clone, Debug, Default)]
pub struct BufferSink(Arc<Mutex<Vec<u8>>>);

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }
}

impl Write for BufferSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for BufferSink {
    type Writer = BufferSink;

    fn writer(&self) -> BufferSink {
        self.clone()
    }
}

/// Formats the greeting for `num`, without a trailing newline.
pub fn greeting(num: ThreadNum) -> String {
    format!("{}{}", GREETING, num)
}

/// Writes `Hello from thread #<num>` on its own line to `sink`.
///
/// The line goes out in a single write so concurrent callers sharing a sink
/// don't tear each other's lines. Write errors are ignored.
pub fn print_hello_routine<S: Sink>(sink: &S, num: ThreadNum) {
    let line = format!("{}\n", greeting(num));
    let mut out = sink.writer();
    let _ = out.write_all(line.as_bytes());
    let _ = out.flush();
}
