// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Component identity used in log spans and as the server-side apply field manager
pub const COMPONENT: &str = "expose-controller";

/// Label keys and values recognised by the controller
pub mod labels {
    /// A Service carrying `expose=true` wants external exposure
    pub const EXPOSE_KEY: &str = "expose";
    pub const EXPOSE_VALUE: &str = "true";

    /// Stamped on every object the controller creates
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
    /// Name of the Service an exposure artifact belongs to
    pub const EXPOSED_SERVICE: &str = "expose-controller/service";
}

/// Annotation keys written by exposure strategies
pub mod annotations {
    /// URL under which the Service is reachable once exposed
    pub const EXPOSE_URL: &str = "fabric8.io/exposeUrl";
    /// `spec.type` a Service had before a strategy switched it; marks the switch as ours
    pub const ORIGINAL_TYPE: &str = "expose-controller/original-type";
}

/// Feed defaults
pub mod feed {
    /// Interval between full resyncs of the local cache
    pub const DEFAULT_RESYNC_PERIOD_SECS: u64 = 30;
}

/// Strategy used when `EXPOSER` is not set
pub const DEFAULT_EXPOSER: &str = "ingress";
