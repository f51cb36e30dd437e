// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Local indexed cache that derives change notifications from watcher events.

use crate::types::{Change, DeletedState, ObjectKey};
use kube::runtime::watcher::Event;
use kube::Resource;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Last known state of every watched object, keyed by `<namespace>/<name>`.
///
/// The feed worker is the only writer. Watch events carry only the new state
/// of an object, so the cache supplies the old state for updates and detects
/// objects that disappeared while the watch was being re-established.
pub struct Informer<K> {
    cache: HashMap<ObjectKey, K>,
    relist: Option<Vec<K>>,
}

impl<K: Resource + Clone> Informer<K> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            relist: None,
        }
    }

    /// Fold one watcher event into the cache and return the resulting notifications
    pub fn apply(&mut self, event: Event<K>) -> Vec<Change<K>> {
        match event {
            Event::Apply(obj) => vec![self.upsert(obj)],
            Event::Delete(obj) => {
                self.cache.remove(&ObjectKey::from_object(&obj));
                vec![Change::Deleted(DeletedState::FullState(obj))]
            }
            Event::Init => {
                debug!("Relist started");
                self.relist = Some(Vec::new());
                Vec::new()
            }
            Event::InitApply(obj) => {
                self.relist.get_or_insert_with(Vec::new).push(obj);
                Vec::new()
            }
            Event::InitDone => self.finish_relist(),
        }
    }

    /// Re-deliver every cached object as an update onto itself
    pub fn resync(&self) -> Vec<Change<K>> {
        let mut keys: Vec<&ObjectKey> = self.cache.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let obj = &self.cache[key];
                Change::Updated {
                    old: obj.clone(),
                    new: obj.clone(),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn upsert(&mut self, obj: K) -> Change<K> {
        let key = ObjectKey::from_object(&obj);
        match self.cache.insert(key, obj.clone()) {
            Some(old) => Change::Updated { old, new: obj },
            None => Change::Added(obj),
        }
    }

    fn finish_relist(&mut self) -> Vec<Change<K>> {
        let listed = self.relist.take().unwrap_or_default();
        let seen: HashSet<ObjectKey> = listed.iter().map(ObjectKey::from_object).collect();

        let mut changes: Vec<Change<K>> = listed.into_iter().map(|obj| self.upsert(obj)).collect();

        let mut gone: Vec<ObjectKey> = self
            .cache
            .keys()
            .filter(|key| !seen.contains(*key))
            .cloned()
            .collect();
        gone.sort();

        for key in gone {
            self.cache.remove(&key);
            changes.push(Change::Deleted(DeletedState::KeyOnly(key.to_string())));
        }

        debug!("Relist finished, {} objects cached", self.cache.len());
        changes
    }
}

impl<K: Resource + Clone> Default for Informer<K> {
    fn default() -> Self {
        Self::new()
    }
}
