// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Feed worker: drives the watch stream, the resync timer and the handler.

use crate::informer::Informer;
use crate::types::Change;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use kube::runtime::watcher::{self, watcher, Event};
use kube::runtime::WatchStreamExt;
use kube::{Api, Resource};
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Consumer of change notifications.
///
/// Notifications are delivered one at a time: the next one is only taken
/// from the feed once `handle` has returned.
#[async_trait]
pub trait ChangeHandler<K: Send>: Send + Sync {
    async fn handle(&self, change: Change<K>);
}

/// Watch `api` and feed every notification to `handler` until `stop` fires
pub async fn run<K, H>(
    api: Api<K>,
    config: watcher::Config,
    resync_period: Duration,
    handler: Arc<H>,
    stop: watch::Receiver<bool>,
) where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    H: ChangeHandler<K> + ?Sized,
{
    info!(
        "Starting change feed with resync every {}s",
        resync_period.as_secs()
    );

    let stream = watcher(api, config).default_backoff().boxed();
    consume(stream, resync_period, handler.as_ref(), stop).await;

    info!("Change feed stopped");
}

/// Fold a stream of watcher events through a local cache into `handler`.
///
/// Returns when `stop` fires, its sender is dropped, or the stream ends.
/// A notification already being handled is finished first.
pub async fn consume<K, S, E, H>(
    mut stream: S,
    resync_period: Duration,
    handler: &H,
    mut stop: watch::Receiver<bool>,
) where
    K: Resource + Clone + Send,
    S: Stream<Item = Result<Event<K>, E>> + Unpin,
    E: Display,
    H: ChangeHandler<K> + ?Sized,
{
    let mut informer = Informer::new();
    let mut resync = interval_at(Instant::now() + resync_period, resync_period);
    resync.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *stop.borrow_and_update() {
            break;
        }

        let changes = tokio::select! {
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            _ = resync.tick() => {
                debug!("Resyncing {} cached objects", informer.len());
                informer.resync()
            }
            event = stream.next() => match event {
                Some(Ok(event)) => informer.apply(event),
                Some(Err(e)) => {
                    warn!("Watch stream error: {}", e);
                    continue;
                }
                None => {
                    warn!("Watch stream ended");
                    break;
                }
            },
        };

        for change in changes {
            if *stop.borrow() {
                debug!("Stop requested, dropping the rest of the batch");
                return;
            }
            handler.handle(change).await;
        }
    }
}
