//! Capability model for the controller
//!
//! Two capability levels exist. The owner holds both; a trusted operator
//! holds only the batch one. The predicate is a plain function of the caller,
//! the current owner and the caller's membership in the trusted set, so it can
//! be checked without any storage around it.

/// What a call requires from its signer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
  /// Configuration, ownership and the escape hatch.
  Owner,
  /// Batch fee operations over caller-supplied pools.
  OwnerOrTrusted,
}

impl Capability {
  /// Whether `caller` holds this capability. `owner` is `None` before the
  /// controller is initialized, in which case only trust can grant anything.
  pub fn permits<AccountId: PartialEq>(
    self,
    caller: &AccountId,
    owner: Option<&AccountId>,
    caller_is_trusted: bool,
  ) -> bool {
    let is_owner = owner == Some(caller);
    match self {
      Capability::Owner => is_owner,
      Capability::OwnerOrTrusted => is_owner || caller_is_trusted,
    }
  }
}
