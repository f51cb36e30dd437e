// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconcilers that react to change notifications.

pub mod service;

pub use service::{has_expose_marker, Action, ServiceReconciler};
