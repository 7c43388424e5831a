//! Configuration for the seller gateway.

use crate::mirror::MirrorConfig;

/// What `update` does with a seller that has no identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateWithoutId {
    /// Treat the request as a create.
    #[default]
    CreateInstead,
    /// Fail with `GatewayError::InvalidArgument`.
    Reject,
}

/// Configuration for the seller gateway.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Handling of updates without an identifier.
    pub update_without_id: UpdateWithoutId,
    /// Retry policy for search index writes.
    pub mirror: MirrorConfig,
}

impl GatewayConfig {
    /// Set how updates without an identifier are handled.
    pub fn with_update_without_id(mut self, policy: UpdateWithoutId) -> Self {
        self.update_without_id = policy;
        self
    }

    /// Set the search index retry policy.
    pub fn with_mirror(mut self, mirror: MirrorConfig) -> Self {
        self.mirror = mirror;
        self
    }
}
