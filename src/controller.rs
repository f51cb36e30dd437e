// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Controller lifecycle: runs the Service feed until stopped.

use crate::config::Config;
use crate::error::Result;
use crate::informer;
use crate::reconcilers::ServiceReconciler;
use crate::strategy::{self, ExposeStrategy};
use k8s_openapi::api::core::v1::Service;
use kube::runtime::watcher;
use kube::{Api, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, Instrument};

pub struct Controller {
    services: Api<Service>,
    resync_period: Duration,
    reconciler: Arc<ServiceReconciler>,
    stop_tx: Arc<watch::Sender<bool>>,
}

/// Cloneable handle that stops a running [`Controller`]
#[derive(Clone)]
pub struct ControllerHandle {
    stop_tx: Arc<watch::Sender<bool>>,
}

impl ControllerHandle {
    /// Raise the stop signal. Only the first call has an effect.
    pub fn stop(&self) {
        if !self.stop_tx.send_replace(true) {
            info!("Stopping expose controller");
        }
    }
}

impl Controller {
    /// Build the controller, failing if the configured strategy cannot be created
    pub fn new(client: Client, config: &Config) -> Result<Self> {
        let strategy = strategy::new(config, client.clone())?;

        let services: Api<Service> = match &config.namespace {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::all(client),
        };

        Ok(Self::with_parts(services, strategy, config.resync_period))
    }

    pub fn with_parts(
        services: Api<Service>,
        strategy: Box<dyn ExposeStrategy>,
        resync_period: Duration,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);

        Self {
            services,
            resync_period,
            reconciler: Arc::new(ServiceReconciler::new(strategy)),
            stop_tx: Arc::new(stop_tx),
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            stop_tx: self.stop_tx.clone(),
        }
    }

    /// Start the feed on a background task and wait for the stop signal.
    ///
    /// Returns as soon as the signal fires; the feed task finishes the
    /// notification it is handling and exits on its own.
    pub async fn run(&self) {
        info!("Starting expose controller");

        let worker = tokio::spawn(
            informer::run(
                self.services.clone(),
                watcher::Config::default(),
                self.resync_period,
                self.reconciler.clone(),
                self.stop_tx.subscribe(),
            )
            .in_current_span(),
        );

        let mut stop = self.stop_tx.subscribe();
        while !*stop.borrow_and_update() {
            if stop.changed().await.is_err() {
                break;
            }
        }

        drop(worker);
        info!("Expose controller stopped");
    }

    pub fn stop(&self) {
        self.handle().stop();
    }
}
