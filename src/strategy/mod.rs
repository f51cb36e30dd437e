// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Exposure strategies that realize or tear down external access to a Service.

pub mod ingress;
pub mod loadbalancer;
pub mod nodeport;

pub use ingress::IngressStrategy;
pub use loadbalancer::LoadBalancerStrategy;
pub use nodeport::NodePortStrategy;

use crate::config::Config;
use crate::constants::annotations;
use crate::error::{ExposeError, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::json;
use tracing::info;

/// Capability to expose a Service outside the cluster.
///
/// Both operations must be idempotent. `remove` is also called for Services
/// that were never added and must succeed when there is nothing to remove.
#[async_trait]
pub trait ExposeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn add(&self, svc: &Service) -> Result<()>;

    async fn remove(&self, svc: &Service) -> Result<()>;
}

/// Build the strategy selected by `config.exposer`
pub fn new(config: &Config, client: Client) -> Result<Box<dyn ExposeStrategy>> {
    let strategy: Box<dyn ExposeStrategy> = match config.exposer.as_str() {
        "ingress" => {
            let domain = config
                .domain
                .clone()
                .ok_or_else(|| ExposeError::MissingDomain(config.exposer.clone()))?;
            Box::new(IngressStrategy::new(client, domain))
        }
        "loadbalancer" => Box::new(LoadBalancerStrategy::new(client)),
        "nodeport" => Box::new(NodePortStrategy::new(client, config.node_ip.clone())),
        other => return Err(ExposeError::UnknownExposer(other.to_string())),
    };

    info!("Using '{}' exposure strategy", strategy.name());
    Ok(strategy)
}

pub(crate) const CLUSTER_IP: &str = "ClusterIP";

/// Namespace of a Service, falling back to `default`
pub(crate) fn service_namespace(svc: &Service) -> String {
    svc.namespace().unwrap_or_else(|| "default".to_string())
}

/// Declared `spec.type` of a Service, if it carries a spec
pub(crate) fn service_type(svc: &Service) -> Option<&str> {
    svc.spec.as_ref().and_then(|s| s.type_.as_deref())
}

/// Exposed URL currently recorded on a Service
pub(crate) fn expose_url(svc: &Service) -> Option<&str> {
    svc.annotations()
        .get(annotations::EXPOSE_URL)
        .map(String::as_str)
}

/// `spec.type` recorded before a strategy switched the Service, if it did
pub(crate) fn original_type(svc: &Service) -> Option<&str> {
    svc.annotations()
        .get(annotations::ORIGINAL_TYPE)
        .map(String::as_str)
}

/// Merge patch switching a Service to `type_`, remembering the type it had
pub(crate) fn switch_type_patch(svc: &Service, type_: &str) -> serde_json::Value {
    let original = service_type(svc).unwrap_or(CLUSTER_IP);
    json!({
        "metadata": { "annotations": { annotations::ORIGINAL_TYPE: original } },
        "spec": { "type": type_ }
    })
}

/// Record the exposed URL on a Service, or strip it when `url` is `None`
pub(crate) async fn set_expose_url(
    client: &Client,
    namespace: &str,
    name: &str,
    url: Option<&str>,
) -> kube::Result<Service> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let patch = json!({
        "metadata": {
            "annotations": {
                annotations::EXPOSE_URL: url
            }
        }
    });
    services
        .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await
}

/// Treat a 404 from the API server as success
pub(crate) fn ignore_not_found<T>(result: kube::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(err)) if err.code == 404 => Ok(()),
        Err(e) => Err(e.into()),
    }
}
