/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// The text every greeting starts with. The thread number follows directly.
pub const GREETING: &str = "Hello from thread #";

/// Prefix of the OS-level name given to spawned worker threads.
pub const WORKER_THREAD_NAME: &str = "hello-worker";
