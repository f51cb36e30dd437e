// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Expose Services by switching them to `type: LoadBalancer`.

use crate::constants::annotations;
use crate::error::Result;
use crate::strategy::{
    ignore_not_found, original_type, service_namespace, service_type, switch_type_patch,
    ExposeStrategy,
};
use crate::types::ObjectKey;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::{
    api::{Patch, PatchParams},
    Api, Client, ResourceExt,
};
use serde_json::json;
use tracing::{debug, info, instrument};

const LOAD_BALANCER: &str = "LoadBalancer";

pub struct LoadBalancerStrategy {
    client: Client,
}

impl LoadBalancerStrategy {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn patch(&self, svc: &Service, patch: &serde_json::Value) -> kube::Result<Service> {
        let services: Api<Service> = Api::namespaced(self.client.clone(), &service_namespace(svc));
        services
            .patch(&svc.name_any(), &PatchParams::default(), &Patch::Merge(patch))
            .await
    }
}

#[async_trait]
impl ExposeStrategy for LoadBalancerStrategy {
    fn name(&self) -> &'static str {
        "loadbalancer"
    }

    #[instrument(skip(self, svc), fields(service = %ObjectKey::from_object(svc)))]
    async fn add(&self, svc: &Service) -> Result<()> {
        if service_type(svc) == Some(LOAD_BALANCER) {
            debug!("Service is already a LoadBalancer");
            return Ok(());
        }

        self.patch(svc, &switch_type_patch(svc, LOAD_BALANCER)).await?;
        info!("Switched service to LoadBalancer");
        Ok(())
    }

    #[instrument(skip(self, svc), fields(service = %ObjectKey::from_object(svc)))]
    async fn remove(&self, svc: &Service) -> Result<()> {
        let Some(original) = original_type(svc) else {
            debug!("Service type was not switched by us, nothing to remove");
            return Ok(());
        };

        let patch = json!({
            "metadata": { "annotations": { annotations::ORIGINAL_TYPE: null } },
            "spec": { "type": original }
        });
        ignore_not_found(self.patch(svc, &patch).await)?;
        info!("Reverted service to {}", original);
        Ok(())
    }
}
