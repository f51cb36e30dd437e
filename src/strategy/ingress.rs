// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Expose Services through a `networking.k8s.io/v1` Ingress per Service.

use crate::constants::{labels, COMPONENT};
use crate::error::{ExposeError, Result};
use crate::strategy::{ignore_not_found, service_namespace, set_expose_url, ExposeStrategy};
use crate::types::ObjectKey;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use kube::{
    api::{DeleteParams, ObjectMeta, Patch, PatchParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

pub struct IngressStrategy {
    client: Client,
    domain: String,
}

impl IngressStrategy {
    pub fn new(client: Client, domain: String) -> Self {
        Self { client, domain }
    }

    /// Hostname a Service is exposed under: `<name>.<namespace>.<domain>`
    pub fn host_for(&self, svc: &Service) -> String {
        format!("{}.{}.{}", svc.name_any(), service_namespace(svc), self.domain)
    }
}

#[async_trait]
impl ExposeStrategy for IngressStrategy {
    fn name(&self) -> &'static str {
        "ingress"
    }

    #[instrument(skip(self, svc), fields(service = %ObjectKey::from_object(svc)))]
    async fn add(&self, svc: &Service) -> Result<()> {
        let name = svc.name_any();
        let namespace = service_namespace(svc);

        let Some(port) = first_port(svc) else {
            return Err(ExposeError::InvalidService(format!(
                "{}/{} has no ports",
                namespace, name
            )));
        };

        let host = self.host_for(svc);
        let ingress = build_ingress(&name, &namespace, &host, port);

        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), &namespace);
        if let Some(existing) = ingresses.get_opt(&name).await? {
            if !is_managed(&existing) {
                warn!(
                    "Ingress {}/{} exists and is not managed by us, not exposing",
                    namespace, name
                );
                return Ok(());
            }
        }

        let pp = PatchParams::apply(COMPONENT).force();
        ingresses.patch(&name, &pp, &Patch::Apply(&ingress)).await?;

        let url = format!("http://{}", host);
        set_expose_url(&self.client, &namespace, &name, Some(&url)).await?;

        info!("Exposed service at {}", url);
        Ok(())
    }

    #[instrument(skip(self, svc), fields(service = %ObjectKey::from_object(svc)))]
    async fn remove(&self, svc: &Service) -> Result<()> {
        let name = svc.name_any();
        let namespace = service_namespace(svc);
        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), &namespace);

        match ingresses.get_opt(&name).await? {
            Some(ingress) if is_managed(&ingress) => {
                ignore_not_found(ingresses.delete(&name, &DeleteParams::default()).await)?;
                info!("Deleted ingress {}/{}", namespace, name);
            }
            Some(_) => {
                debug!("Ingress {}/{} is not managed by us, leaving it", namespace, name);
            }
            None => {
                debug!("No ingress to remove for {}/{}", namespace, name);
            }
        }

        ignore_not_found(set_expose_url(&self.client, &namespace, &name, None).await)
    }
}

fn first_port(svc: &Service) -> Option<i32> {
    svc.spec
        .as_ref()
        .and_then(|s| s.ports.as_ref())
        .and_then(|ports| ports.first())
        .map(|p| p.port)
}

fn is_managed(ingress: &Ingress) -> bool {
    ingress
        .labels()
        .get(labels::MANAGED_BY)
        .is_some_and(|v| v == COMPONENT)
}

fn build_ingress(name: &str, namespace: &str, host: &str, port: i32) -> Ingress {
    let backend = IngressBackend {
        service: Some(IngressServiceBackend {
            name: name.to_string(),
            port: Some(ServiceBackendPort {
                number: Some(port),
                ..Default::default()
            }),
        }),
        ..Default::default()
    };

    Ingress {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(BTreeMap::from([
                (labels::MANAGED_BY.to_string(), COMPONENT.to_string()),
                (labels::EXPOSED_SERVICE.to_string(), name.to_string()),
            ])),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            rules: Some(vec![IngressRule {
                host: Some(host.to_string()),
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some("/".to_string()),
                        path_type: "Prefix".to_string(),
                        backend,
                    }],
                }),
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
