// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Service reconciler - applies the expose label policy to Service notifications.

use crate::constants::labels;
use crate::error::Result;
use crate::informer::ChangeHandler;
use crate::strategy::ExposeStrategy;
use crate::types::{Change, DeletedState, ObjectKey};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::{api::ObjectMeta, ResourceExt};
use tracing::{debug, error, instrument, warn};

/// Check if a Service carries the `expose=true` label
pub fn has_expose_marker(svc: &Service) -> bool {
    svc.labels()
        .get(labels::EXPOSE_KEY)
        .is_some_and(|v| v == labels::EXPOSE_VALUE)
}

/// Exposure call decided for a single notification
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Add(Service),
    Remove(Service),
}

pub struct ServiceReconciler {
    strategy: Box<dyn ExposeStrategy>,
}

impl ServiceReconciler {
    pub fn new(strategy: Box<dyn ExposeStrategy>) -> Self {
        Self { strategy }
    }

    /// Decide which exposure call, if any, a notification requires.
    ///
    /// Updates re-apply `Add` whenever the new state is labelled, so spec
    /// changes of an exposed Service are pushed through. Deletes always
    /// `Remove`, whatever the labels were, since a tombstone carries none.
    /// Fails only for a tombstone whose key cannot be parsed.
    pub fn plan(change: Change<Service>) -> Result<Option<Action>> {
        let action = match change {
            Change::Added(svc) => has_expose_marker(&svc).then_some(Action::Add(svc)),
            Change::Updated { old, new } => {
                if has_expose_marker(&new) {
                    Some(Action::Add(new))
                } else if has_expose_marker(&old) {
                    Some(Action::Remove(new))
                } else {
                    None
                }
            }
            Change::Deleted(DeletedState::FullState(svc)) => Some(Action::Remove(svc)),
            Change::Deleted(DeletedState::KeyOnly(key)) => {
                let key = ObjectKey::parse(&key)?;
                Some(Action::Remove(Service {
                    metadata: ObjectMeta {
                        namespace: key.namespace,
                        name: Some(key.name),
                        ..Default::default()
                    },
                    ..Default::default()
                }))
            }
        };

        Ok(action)
    }

    /// Handle one notification. Failures are logged and left for the next resync.
    #[instrument(skip(self, change), fields(service = %change.key()))]
    pub async fn reconcile(&self, change: Change<Service>) {
        let action = match Self::plan(change) {
            Ok(Some(action)) => action,
            Ok(None) => {
                debug!("No exposure change required");
                return;
            }
            Err(e) => {
                warn!("Dropping delete notification: {}", e);
                return;
            }
        };

        match action {
            Action::Add(svc) => {
                debug!("Adding exposure via {}", self.strategy.name());
                if let Err(e) = self.strategy.add(&svc).await {
                    error!("Add failed: {}", e);
                }
            }
            Action::Remove(svc) => {
                debug!("Removing exposure via {}", self.strategy.name());
                if let Err(e) = self.strategy.remove(&svc).await {
                    error!("Remove failed: {}", e);
                }
            }
        }
    }
}

#[async_trait]
impl ChangeHandler<Service> for ServiceReconciler {
    async fn handle(&self, change: Change<Service>) {
        self.reconcile(change).await;
    }
}
