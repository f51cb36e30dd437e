// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod informer;
pub mod reconcilers;
pub mod strategy;
pub mod types;

#[cfg(test)]
mod test_utils;
