// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the sparsevox crates; see the `examples/` directory
//! of this package.
