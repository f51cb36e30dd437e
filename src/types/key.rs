// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{ExposeError, Result};
use kube::{Resource, ResourceExt};
use std::fmt;

/// Cache key of an object, rendered as `<namespace>/<name>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn from_object<K: Resource>(obj: &K) -> Self {
        Self {
            namespace: obj.namespace(),
            name: obj.name_any(),
        }
    }

    /// Parse a namespaced key. Keys without a separator or with an empty
    /// segment are rejected.
    pub fn parse(key: &str) -> Result<Self> {
        let Some((namespace, name)) = key.split_once('/') else {
            return Err(ExposeError::MalformedKey(key.to_string()));
        };

        if namespace.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ExposeError::MalformedKey(key.to_string()));
        }

        Ok(Self::new(namespace, name))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}
