// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object identity and change notification types.

pub mod change;
pub mod key;

pub use change::{Change, DeletedState};
pub use key::ObjectKey;
