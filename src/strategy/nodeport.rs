// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Expose Services by switching them to `type: NodePort`.

use crate::constants::annotations;
use crate::error::Result;
use crate::strategy::{
    expose_url, ignore_not_found, original_type, service_namespace, service_type, set_expose_url,
    switch_type_patch, ExposeStrategy,
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

const NODE_PORT: &str = "NodePort";

pub struct NodePortStrategy {
    client: Client,
    /// Address advertised in the exposed URL, no URL is recorded without it
    node_ip: Option<String>,
}

impl NodePortStrategy {
    pub fn new(client: Client, node_ip: Option<String>) -> Self {
        Self { client, node_ip }
    }

    fn api(&self, svc: &Service) -> Api<Service> {
        Api::namespaced(self.client.clone(), &service_namespace(svc))
    }
}

#[async_trait]
impl ExposeStrategy for NodePortStrategy {
    fn name(&self) -> &'static str {
        "nodeport"
    }

    #[instrument(skip(self, svc), fields(service = %ObjectKey::from_object(svc)))]
    async fn add(&self, svc: &Service) -> Result<()> {
        let current = if service_type(svc) == Some(NODE_PORT) {
            debug!("Service is already a NodePort");
            svc.clone()
        } else {
            let patch = switch_type_patch(svc, NODE_PORT);
            let patched = self
                .api(svc)
                .patch(&svc.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
                .await?;
            info!("Switched service to NodePort");
            patched
        };

        let (Some(ip), Some(port)) = (self.node_ip.as_deref(), first_node_port(&current)) else {
            return Ok(());
        };

        let url = format!("http://{}:{}", ip, port);
        if expose_url(svc) != Some(url.as_str()) {
            set_expose_url(&self.client, &service_namespace(svc), &svc.name_any(), Some(&url))
                .await?;
            info!("Exposed service at {}", url);
        }
        Ok(())
    }

    #[instrument(skip(self, svc), fields(service = %ObjectKey::from_object(svc)))]
    async fn remove(&self, svc: &Service) -> Result<()> {
        let Some(original) = original_type(svc) else {
            if expose_url(svc).is_none() {
                debug!("Service type was not switched by us, nothing to remove");
                return Ok(());
            }
            let (namespace, name) = (service_namespace(svc), svc.name_any());
            return ignore_not_found(set_expose_url(&self.client, &namespace, &name, None).await);
        };

        let patch = json!({
            "metadata": {
                "annotations": {
                    annotations::EXPOSE_URL: null,
                    annotations::ORIGINAL_TYPE: null
                }
            },
            "spec": { "type": original }
        });
        ignore_not_found(
            self.api(svc)
                .patch(&svc.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
                .await,
        )?;
        info!("Reverted service to {}", original);
        Ok(())
    }
}

fn first_node_port(svc: &Service) -> Option<i32> {
    svc.spec
        .as_ref()
        .and_then(|s| s.ports.as_ref())
        .and_then(|ports| ports.iter().find_map(|p| p.node_port))
}
