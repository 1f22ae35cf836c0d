//! In-memory capability grants.
//!
//! [`RoleGrants`] keeps a set of `(account, capability)` pairs. Granting
//! and revoking are idempotent; a capability check is a set lookup.

use std::collections::HashSet;

use croft_types::traits::{Capability, CapabilityCheck};
use croft_types::{short_hex, Address};

use crate::{AccessError, Result};

/// In-memory capability table.
#[derive(Clone, Debug, Default)]
pub struct RoleGrants {
    grants: HashSet<(Address, Capability)>,
}

impl RoleGrants {
    /// Create an empty table with no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `capability` to `account`. Granting twice is a no-op.
    pub fn grant(&mut self, account: &Address, capability: Capability) {
        if self.grants.insert((*account, capability)) {
            tracing::info!(account = %short_hex(account), ?capability, "capability granted");
        }
    }

    /// Revoke `capability` from `account`. Revoking an absent grant is a no-op.
    pub fn revoke(&mut self, account: &Address, capability: Capability) {
        if self.grants.remove(&(*account, capability)) {
            tracing::info!(account = %short_hex(account), ?capability, "capability revoked");
        }
    }
}

impl CapabilityCheck for RoleGrants {
    fn has_capability(&self, caller: &Address, capability: Capability) -> bool {
        self.grants.contains(&(*caller, capability))
    }
}

/// Check that `caller` holds `capability`.
///
/// # Errors
///
/// - [`AccessError::Unauthorized`] if the backend rejects the caller
pub fn require(
    check: &impl CapabilityCheck,
    caller: &Address,
    capability: Capability,
) -> Result<()> {
    if check.has_capability(caller, capability) {
        return Ok(());
    }
    Err(AccessError::Unauthorized {
        account: hex::encode(caller),
        capability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = [0x01; 32];
    const BOB: Address = [0x02; 32];

    #[test]
    fn test_grant_and_check() {
        let mut grants = RoleGrants::new();
        assert!(!grants.has_capability(&ALICE, Capability::DistributeRewards));

        grants.grant(&ALICE, Capability::DistributeRewards);
        assert!(grants.has_capability(&ALICE, Capability::DistributeRewards));
        assert!(!grants.has_capability(&ALICE, Capability::MintRewardToken));
        assert!(!grants.has_capability(&BOB, Capability::DistributeRewards));
    }

    #[test]
    fn test_revoke() {
        let mut grants = RoleGrants::new();
        grants.grant(&ALICE, Capability::MintRewardToken);
        grants.revoke(&ALICE, Capability::MintRewardToken);
        assert!(!grants.has_capability(&ALICE, Capability::MintRewardToken));
    }

    #[test]
    fn test_grant_idempotent() {
        let mut grants = RoleGrants::new();
        grants.grant(&ALICE, Capability::DistributeRewards);
        grants.grant(&ALICE, Capability::DistributeRewards);
        assert!(grants.has_capability(&ALICE, Capability::DistributeRewards));

        grants.revoke(&ALICE, Capability::DistributeRewards);
        assert!(!grants.has_capability(&ALICE, Capability::DistributeRewards));
    }

    #[test]
    fn test_require_ok() {
        let mut grants = RoleGrants::new();
        grants.grant(&ALICE, Capability::DistributeRewards);
        require(&grants, &ALICE, Capability::DistributeRewards).expect("should be authorized");
    }

    #[test]
    fn test_require_unauthorized() {
        let grants = RoleGrants::new();
        let err = require(&grants, &BOB, Capability::DistributeRewards)
            .expect_err("should be unauthorized");
        let message = err.to_string();
        assert!(message.contains(&hex::encode(BOB)));
        assert!(message.contains("missing capability"));
    }
}
