//! Write-time validation hook.
//!
//! The gateway itself only checks identifiers. Applications that need field
//! rules install one or more validators; they run before every create and
//! update and any error aborts the write before the store is touched.

use async_trait::async_trait;

use crate::errors::GatewayError;
use seller_shared::Seller;

/// A check applied to sellers before they are written.
#[async_trait]
pub trait SellerValidator: Send + Sync {
    /// Inspect the seller about to be written.
    ///
    /// Return `GatewayError::InvalidArgument` to reject it.
    async fn validate(&self, seller: &Seller) -> Result<(), GatewayError>;
}

/// Rejects sellers without a name.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequireName;

#[async_trait]
impl SellerValidator for RequireName {
    async fn validate(&self, seller: &Seller) -> Result<(), GatewayError> {
        match seller.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(GatewayError::invalid_argument("A seller must have a name")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_require_name() {
        assert!(RequireName.validate(&Seller::named("Garage")).await.is_ok());
        assert!(RequireName.validate(&Seller::named("   ")).await.is_err());
        assert!(RequireName.validate(&Seller::default()).await.is_err());
    }
}
