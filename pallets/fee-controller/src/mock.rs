use crate as pallet_fee_controller;
use crate::{FactoryOps, PoolOps, TransferAndDispatch};
use alloc::{collections::BTreeSet, vec, vec::Vec};
use core::cell::RefCell;
use frame::prelude::*;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  storage::unhashed,
  traits::{ConstU32, ConstU128, Get},
};
use polkadot_sdk::frame_system::{self, EnsureRoot};
use polkadot_sdk::sp_runtime::{
  BuildStorage,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::ecosystem::{params, pallet_ids};

type Block = frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;
pub type Balance = primitives::ecosystem::Balance;
pub type PoolId = u32;

pub const OWNER: AccountId = 1;
pub const OPERATOR: AccountId = 2;
pub const STRANGER: AccountId = 3;
pub const NEW_OWNER: AccountId = 4;
pub const MAKER: AccountId = 10;
pub const FACTORY: AccountId = 20;
pub const TARGET: AccountId = 30;

pub const POOL_A: PoolId = 100;
pub const POOL_B: PoolId = 101;
pub const POOL_C: PoolId = 102;

pub const CONTROLLER_FUNDS: Balance = 1_000_000;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    FeeController: pallet_fee_controller,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<Balance>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ConstU32<50>;
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = Balance;
  type RuntimeEvent = RuntimeEvent;
  type DustRemoval = ();
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = RuntimeHoldReason;
  type RuntimeFreezeReason = RuntimeFreezeReason;
  type DoneSlashHandler = ();
}

pub struct FeeControllerPalletId;
impl Get<PalletId> for FeeControllerPalletId {
  fn get() -> PalletId {
    PalletId(*pallet_ids::FEE_CONTROLLER_PALLET_ID)
  }
}

// Factory and pool state lives in unhashed storage so that it is rolled back
// together with the controller's own writes. Only test knobs and the call
// counter sit outside storage.
thread_local! {
  static FAILING_POOLS: RefCell<BTreeSet<PoolId>> = const { RefCell::new(BTreeSet::new()) };
  static EXTERNAL_CALLS: RefCell<u32> = const { RefCell::new(0) };
}

fn state_key(prefix: &[u8], id: impl Encode) -> Vec<u8> {
  let mut key = b"mock/".to_vec();
  key.extend_from_slice(prefix);
  id.encode_to(&mut key);
  key
}

fn record_call() {
  EXTERNAL_CALLS.with(|c| *c.borrow_mut() += 1);
}

pub fn external_calls() -> u32 {
  EXTERNAL_CALLS.with(|c| *c.borrow())
}

/// Make every call against `pool` fail until the next test externalities.
pub fn fail_pool(pool: PoolId) {
  FAILING_POOLS.with(|p| p.borrow_mut().insert(pool));
}

fn is_failing(pool: &PoolId) -> bool {
  FAILING_POOLS.with(|p| p.borrow().contains(pool))
}

pub fn factory_owner(factory: AccountId) -> Option<AccountId> {
  unhashed::get(&state_key(b"factory_owner", factory))
}

pub fn set_factory_owner(factory: AccountId, owner: AccountId) {
  unhashed::put(&state_key(b"factory_owner", factory), &owner);
}

pub fn fee_tier(factory: AccountId, fee: u32) -> Option<i32> {
  unhashed::get(&state_key(b"fee_tier", (factory, fee)))
}

/// A pool on `FACTORY` with protocol fees switched off and the given fees owed.
pub fn create_pool(pool: PoolId, owed_0: Balance, owed_1: Balance) {
  unhashed::put(&state_key(b"pool_fee", pool), &(0u8, 0u8));
  unhashed::put(&state_key(b"pool_owed", pool), &(owed_0, owed_1));
}

pub fn pool_fee_protocol(pool: PoolId) -> Option<(u8, u8)> {
  unhashed::get(&state_key(b"pool_fee", pool))
}

pub fn pool_owed(pool: PoolId) -> (Balance, Balance) {
  unhashed::get_or_default(&state_key(b"pool_owed", pool))
}

/// Amounts the controller last asked `pool` to send, whatever the pool owed.
pub fn collect_requested(pool: PoolId) -> Option<(Balance, Balance)> {
  unhashed::get(&state_key(b"collect_requested", pool))
}

pub fn swept_to(recipient: AccountId) -> (Balance, Balance) {
  unhashed::get_or_default(&state_key(b"swept", recipient))
}

fn ensure_factory_owner(caller: &AccountId, factory: &AccountId) -> DispatchResult {
  if factory_owner(*factory) != Some(*caller) {
    return Err(DispatchError::Other("Not factory owner"));
  }
  Ok(())
}

fn ensure_pool(pool: &PoolId) -> DispatchResult {
  if is_failing(pool) {
    return Err(DispatchError::Other("Pool call reverted"));
  }
  if pool_fee_protocol(*pool).is_none() {
    return Err(DispatchError::Other("Pool not found"));
  }
  Ok(())
}

/// Factory with concentrated-liquidity rules: fee below 100%, spacing in
/// (0, 16384), tiers never re-enabled.
pub struct MockFactory;
impl FactoryOps<AccountId> for MockFactory {
  fn enable_fee_amount(
    caller: &AccountId,
    factory: &AccountId,
    fee: u32,
    tick_spacing: i32,
  ) -> DispatchResult {
    record_call();
    ensure_factory_owner(caller, factory)?;
    if fee >= 1_000_000 || tick_spacing <= 0 || tick_spacing >= 16_384 {
      return Err(DispatchError::Other("Invalid fee tier"));
    }
    if fee_tier(*factory, fee).is_some() {
      return Err(DispatchError::Other("Fee tier already enabled"));
    }
    unhashed::put(&state_key(b"fee_tier", (*factory, fee)), &tick_spacing);
    Ok(())
  }

  fn set_owner(caller: &AccountId, factory: &AccountId, new_owner: &AccountId) -> DispatchResult {
    record_call();
    ensure_factory_owner(caller, factory)?;
    set_factory_owner(*factory, *new_owner);
    Ok(())
  }
}

/// Pools owned by `FACTORY`; only its owner may touch protocol fees, which
/// must be 0 or within 4..=10 on each leg.
pub struct MockPools;
impl PoolOps<AccountId, PoolId, Balance> for MockPools {
  fn set_fee_protocol(
    caller: &AccountId,
    pool: &PoolId,
    fee_protocol_0: u8,
    fee_protocol_1: u8,
  ) -> DispatchResult {
    record_call();
    ensure_factory_owner(caller, &FACTORY)?;
    ensure_pool(pool)?;
    let valid = |fee: u8| fee == 0 || (4..=10).contains(&fee);
    if !valid(fee_protocol_0) || !valid(fee_protocol_1) {
      return Err(DispatchError::Other("Invalid protocol fee"));
    }
    unhashed::put(
      &state_key(b"pool_fee", *pool),
      &(fee_protocol_0, fee_protocol_1),
    );
    Ok(())
  }

  fn protocol_fees(pool: &PoolId) -> Result<(Balance, Balance), DispatchError> {
    record_call();
    ensure_pool(pool)?;
    Ok(pool_owed(*pool))
  }

  fn collect_protocol(
    caller: &AccountId,
    pool: &PoolId,
    recipient: &AccountId,
    amount_0: Balance,
    amount_1: Balance,
  ) -> Result<(Balance, Balance), DispatchError> {
    record_call();
    ensure_factory_owner(caller, &FACTORY)?;
    ensure_pool(pool)?;
    unhashed::put(
      &state_key(b"collect_requested", *pool),
      &(amount_0, amount_1),
    );
    let (owed_0, owed_1) = pool_owed(*pool);
    let sent_0 = amount_0.min(owed_0);
    let sent_1 = amount_1.min(owed_1);
    unhashed::put(
      &state_key(b"pool_owed", *pool),
      &(owed_0 - sent_0, owed_1 - sent_1),
    );
    let (swept_0, swept_1) = swept_to(*recipient);
    unhashed::put(
      &state_key(b"swept", *recipient),
      &(swept_0 + sent_0, swept_1 + sent_1),
    );
    Ok((sent_0, sent_1))
  }
}

impl pallet_fee_controller::Config for Test {
  type PoolId = PoolId;
  type Balance = Balance;
  type PoolFactory = MockFactory;
  type Pools = MockPools;
  type ActionExecutor = TransferAndDispatch<Balances, RuntimeCall>;
  type InitializeOrigin = EnsureRoot<AccountId>;
  type PalletId = FeeControllerPalletId;
  type MaxPoolsPerBatch = ConstU32<{ params::MAX_POOLS_PER_BATCH }>;
  type MaxActionPayload = ConstU32<{ params::MAX_ACTION_PAYLOAD }>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId, PoolId> for MockBenchmarkHelper {
  fn setup_factory(controller: &AccountId) -> AccountId {
    set_factory_owner(FACTORY, *controller);
    FACTORY
  }

  fn setup_pool(controller: &AccountId, index: u32) -> PoolId {
    set_factory_owner(FACTORY, *controller);
    let pool = 1_000 + index;
    create_pool(pool, 1_000, 2_000);
    pool
  }

  fn action_payload(len: u32) -> Vec<u8> {
    if len == 0 {
      return Vec::new();
    }
    remark_payload(vec![0u8; (len as usize).saturating_sub(8)])
  }
}

/// `do_action` payload that makes the controller emit a `Remarked` event.
pub fn remark_payload(remark: Vec<u8>) -> Vec<u8> {
  RuntimeCall::System(frame_system::Call::remark_with_event { remark }).encode()
}

/// Controller with `OWNER`, `OPERATOR` trusted, `FACTORY` owned by the
/// controller and `MAKER` as treasury. No pools exist yet.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  build_ext(pallet_fee_controller::GenesisConfig::<Test> {
    owner: Some(OWNER),
    trusted_operators: vec![OPERATOR],
    factory: Some(FACTORY),
    maker: Some(MAKER),
    protocol_fee: params::DEFAULT_PROTOCOL_FEE,
  })
}

/// Controller with no owner, awaiting `initialize`.
pub fn new_uninitialized_ext() -> polkadot_sdk::sp_io::TestExternalities {
  build_ext(pallet_fee_controller::GenesisConfig::<Test>::default())
}

pub fn build_ext(
  controller: pallet_fee_controller::GenesisConfig<Test>,
) -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![
      (OWNER, 1_000),
      (OPERATOR, 1_000),
      (FeeController::account_id(), CONTROLLER_FUNDS),
    ],
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  controller.assimilate_storage(&mut t).unwrap();

  FAILING_POOLS.with(|p| p.borrow_mut().clear());
  EXTERNAL_CALLS.with(|c| *c.borrow_mut() = 0);

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| {
    System::set_block_number(1);
    set_factory_owner(FACTORY, FeeController::account_id());
  });
  ext
}
