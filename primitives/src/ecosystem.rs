//! Ecosystem Constants for the fee controller
//!
//! Pallet identifiers and default parameters shared by every runtime that
//! hosts the controller, re-used through the primitives crate.

/// Balance type alias for consistency across the ecosystem
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// Used by Polkadot SDK's `PalletId::into_account_truncating()` to generate
/// the account the pallet signs as.
pub mod pallet_ids {
  /// Fee Controller pallet ID (sovereign account towards the pool factory)
  pub const FEE_CONTROLLER_PALLET_ID: &[u8; 8] = b"feectrl0";
}

/// Controller parameters.
pub mod params {
  /// Protocol fee a fresh controller applies until the owner picks one.
  /// Zero switches protocol fees off.
  pub const DEFAULT_PROTOCOL_FEE: u8 = 0;

  /// Pools a single `apply_protocol_fee` or `collect_fees` call may name
  pub const MAX_POOLS_PER_BATCH: u32 = 64;

  /// Bytes a single `do_action` payload may carry
  pub const MAX_ACTION_PAYLOAD: u32 = 4 * 1024;
}
