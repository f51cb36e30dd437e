// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::ObjectKey;
use kube::Resource;

/// Payload of a delete notification
#[derive(Clone, Debug, PartialEq)]
pub enum DeletedState<K> {
    /// Last known state of the deleted object
    FullState(K),
    /// Only the `<namespace>/<name>` key survived, the final state is unknown
    KeyOnly(String),
}

/// A single notification produced by the change feed
#[derive(Clone, Debug, PartialEq)]
pub enum Change<K> {
    Added(K),
    Updated { old: K, new: K },
    Deleted(DeletedState<K>),
}

impl<K: Resource> Change<K> {
    /// Key of the object this notification is about
    pub fn key(&self) -> String {
        match self {
            Change::Added(obj)
            | Change::Updated { new: obj, .. }
            | Change::Deleted(DeletedState::FullState(obj)) => {
                ObjectKey::from_object(obj).to_string()
            }
            Change::Deleted(DeletedState::KeyOnly(key)) => key.clone(),
        }
    }
}
