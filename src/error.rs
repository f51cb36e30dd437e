// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExposeError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Unknown exposer type: {0}")]
    UnknownExposer(String),

    #[error("Exposer '{0}' requires a domain to be configured")]
    MissingDomain(String),

    #[error("Malformed object key '{0}', expected <namespace>/<name>")]
    MalformedKey(String),

    #[error("Service cannot be exposed: {0}")]
    InvalidService(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ExposeError>;
