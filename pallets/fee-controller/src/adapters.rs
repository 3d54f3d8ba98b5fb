//! Adapter traits for the external pool protocol
//!
//! The controller never owns pool or factory state. Everything it does to the
//! outside world goes through one of the three traits below, so a runtime can
//! bind them to whatever DEX implementation it hosts.

use codec::DecodeLimit;
use core::marker::PhantomData;
use frame::prelude::*;
use polkadot_sdk::{
  frame_support::{
    dispatch::GetDispatchInfo,
    weights::Weight,
    traits::{fungible::Mutate as NativeMutate, tokens::Preservation},
  },
  sp_runtime::traits::{Dispatchable, Zero},
};

/// Maximum nesting depth accepted when decoding a `do_action` payload as a call.
pub const MAX_ACTION_CALL_DEPTH: u32 = 16;

/// Pool factory entry points.
///
/// `caller` is the controller's sovereign account; the factory is expected to
/// check that it is its owner.
pub trait FactoryOps<AccountId> {
  /// Enable a new fee tier. Rejections (duplicate tier, bad spacing) are the
  /// factory's call.
  fn enable_fee_amount(
    caller: &AccountId,
    factory: &AccountId,
    fee: u32,
    tick_spacing: i32,
  ) -> DispatchResult;

  /// Hand ownership of the factory to `new_owner`.
  fn set_owner(caller: &AccountId, factory: &AccountId, new_owner: &AccountId) -> DispatchResult;
}

/// Per-pool protocol fee entry points.
pub trait PoolOps<AccountId, PoolId, Balance> {
  fn set_fee_protocol(
    caller: &AccountId,
    pool: &PoolId,
    fee_protocol_0: u8,
    fee_protocol_1: u8,
  ) -> DispatchResult;

  /// Protocol fees accrued on both legs and not yet collected.
  fn protocol_fees(pool: &PoolId) -> Result<(Balance, Balance), DispatchError>;

  /// Send up to the requested amounts to `recipient`, returning what was sent.
  fn collect_protocol(
    caller: &AccountId,
    pool: &PoolId,
    recipient: &AccountId,
    amount_0: Balance,
    amount_1: Balance,
  ) -> Result<(Balance, Balance), DispatchError>;
}

/// Arbitrary outbound call used by `do_action`.
///
/// This is the single unaudited path out of the controller: nothing about the
/// payload is interpreted before it reaches the implementation.
pub trait ActionExecutor<AccountId, Balance> {
  fn execute(
    caller: &AccountId,
    target: &AccountId,
    value: Balance,
    payload: &[u8],
  ) -> DispatchResult;

  /// Weight of whatever `payload` makes the implementation run, on top of the
  /// controller's own `do_action` cost.
  fn weight(payload: &[u8]) -> Weight;
}

impl<AccountId> FactoryOps<AccountId> for () {
  fn enable_fee_amount(_: &AccountId, _: &AccountId, _: u32, _: i32) -> DispatchResult {
    Err(DispatchError::Other("FactoryOps not configured"))
  }

  fn set_owner(_: &AccountId, _: &AccountId, _: &AccountId) -> DispatchResult {
    Err(DispatchError::Other("FactoryOps not configured"))
  }
}

impl<AccountId, PoolId, Balance> PoolOps<AccountId, PoolId, Balance> for () {
  fn set_fee_protocol(_: &AccountId, _: &PoolId, _: u8, _: u8) -> DispatchResult {
    Err(DispatchError::Other("PoolOps not configured"))
  }

  fn protocol_fees(_: &PoolId) -> Result<(Balance, Balance), DispatchError> {
    Err(DispatchError::Other("PoolOps not configured"))
  }

  fn collect_protocol(
    _: &AccountId,
    _: &PoolId,
    _: &AccountId,
    _: Balance,
    _: Balance,
  ) -> Result<(Balance, Balance), DispatchError> {
    Err(DispatchError::Other("PoolOps not configured"))
  }
}

impl<AccountId, Balance> ActionExecutor<AccountId, Balance> for () {
  fn execute(_: &AccountId, _: &AccountId, _: Balance, _: &[u8]) -> DispatchResult {
    Err(DispatchError::Other("ActionExecutor not configured"))
  }

  fn weight(_: &[u8]) -> Weight {
    Weight::zero()
  }
}

/// `ActionExecutor` backed by the runtime itself.
///
/// Moves `value` of the native currency from the controller to `target`, then,
/// when the payload is non-empty, decodes it as a runtime call and dispatches it
/// with the controller's signed origin. A zero value skips the transfer.
/// The decoded call's declared weight is charged up front.
pub struct TransferAndDispatch<Currency, Call>(PhantomData<(Currency, Call)>);

impl<Currency, Call: Decode> TransferAndDispatch<Currency, Call> {
  fn decode_call(payload: &[u8]) -> Result<Call, DispatchError> {
    Call::decode_all_with_depth_limit(MAX_ACTION_CALL_DEPTH, &mut &payload[..])
      .map_err(|_| DispatchError::Other("Undecodable action payload"))
  }
}

impl<AccountId, Balance, Currency, Call> ActionExecutor<AccountId, Balance>
  for TransferAndDispatch<Currency, Call>
where
  AccountId: Clone + Eq,
  Balance: Zero,
  Currency: NativeMutate<AccountId, Balance = Balance>,
  Call: Decode + Dispatchable + GetDispatchInfo,
  <Call as Dispatchable>::RuntimeOrigin: From<frame_system::RawOrigin<AccountId>>,
{
  fn execute(
    caller: &AccountId,
    target: &AccountId,
    value: Balance,
    payload: &[u8],
  ) -> DispatchResult {
    if !value.is_zero() {
      Currency::transfer(caller, target, value, Preservation::Expendable)?;
    }
    if payload.is_empty() {
      return Ok(());
    }
    Self::decode_call(payload)?
      .dispatch(frame_system::RawOrigin::Signed(caller.clone()).into())
      .map(|_| ())
      .map_err(|e| e.error)
  }

  // An undecodable payload fails in `execute` before anything runs.
  fn weight(payload: &[u8]) -> Weight {
    if payload.is_empty() {
      return Weight::zero();
    }
    Self::decode_call(payload)
      .map(|call| call.get_dispatch_info().call_weight)
      .unwrap_or_default()
  }
}
