// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Change feed: turns a kube watch stream into add/update/delete notifications.

pub mod cache;
pub mod feed;

pub use cache::Informer;
pub use feed::{consume, run, ChangeHandler};
