extern crate alloc;

use crate::*;
use alloc::vec::Vec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::{BoundedVec, traits::Get};
use polkadot_sdk::frame_system::RawOrigin;
use polkadot_sdk::sp_runtime::traits::Zero;

fn installed_owner<T: Config>() -> T::AccountId {
  let owner: T::AccountId = account("owner", 0, 0);
  Owner::<T>::put(&owner);
  owner
}

fn pools<T: Config>(n: u32) -> PoolsOf<T> {
  let controller = Pallet::<T>::account_id();
  let ids: Vec<T::PoolId> = (0..n)
    .map(|i| T::BenchmarkHelper::setup_pool(&controller, i))
    .collect();
  BoundedVec::truncate_from(ids)
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn initialize() -> Result<(), BenchmarkError> {
    Owner::<T>::kill();
    let owner: T::AccountId = account("owner", 0, 0);
    let operator: T::AccountId = account("operator", 0, 0);
    let factory: T::AccountId = account("factory", 0, 0);
    let maker: T::AccountId = account("maker", 0, 0);
    let origin =
      T::InitializeOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, owner.clone(), operator, factory, maker, 5);

    assert_eq!(Owner::<T>::get(), Some(owner));
    Ok(())
  }

  #[benchmark]
  fn create_fee_tier() {
    let owner = installed_owner::<T>();
    let factory = T::BenchmarkHelper::setup_factory(&Pallet::<T>::account_id());
    Factory::<T>::put(&factory);

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), 2_500, 50);
  }

  #[benchmark]
  fn set_factory_owner() {
    let owner = installed_owner::<T>();
    let factory = T::BenchmarkHelper::setup_factory(&Pallet::<T>::account_id());
    Factory::<T>::put(&factory);
    let new_owner: T::AccountId = account("new_owner", 0, 0);

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), new_owner);
  }

  #[benchmark]
  fn set_protocol_fee() {
    let owner = installed_owner::<T>();

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), 6);

    assert_eq!(ProtocolFee::<T>::get(), 6);
  }

  #[benchmark]
  fn set_maker() {
    let owner = installed_owner::<T>();
    let maker: T::AccountId = account("maker", 0, 0);

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), maker.clone());

    assert_eq!(Maker::<T>::get(), Some(maker));
  }

  #[benchmark]
  fn set_factory() {
    let owner = installed_owner::<T>();
    let factory: T::AccountId = account("factory", 0, 0);

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), factory.clone());

    assert_eq!(Factory::<T>::get(), Some(factory));
  }

  #[benchmark]
  fn apply_protocol_fee(n: Linear<1, { T::MaxPoolsPerBatch::get() }>) {
    installed_owner::<T>();
    let operator: T::AccountId = whitelisted_caller();
    TrustedOperators::<T>::insert(&operator, ());
    ProtocolFee::<T>::put(6);
    let pools = pools::<T>(n);

    #[extrinsic_call]
    _(RawOrigin::Signed(operator), pools);
  }

  #[benchmark]
  fn collect_fees(n: Linear<1, { T::MaxPoolsPerBatch::get() }>) {
    installed_owner::<T>();
    let operator: T::AccountId = whitelisted_caller();
    TrustedOperators::<T>::insert(&operator, ());
    Maker::<T>::put(account::<T::AccountId>("maker", 0, 0));
    let pools = pools::<T>(n);

    #[extrinsic_call]
    _(RawOrigin::Signed(operator), pools);
  }

  #[benchmark]
  fn do_action(l: Linear<0, { T::MaxActionPayload::get() }>) {
    let owner = installed_owner::<T>();
    let target: T::AccountId = account("target", 0, 0);
    let payload = BoundedVec::truncate_from(T::BenchmarkHelper::action_payload(l));

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), target, Zero::zero(), payload);
  }

  #[benchmark]
  fn transfer_ownership() {
    let owner = installed_owner::<T>();
    let new_owner: T::AccountId = account("new_owner", 0, 0);

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), new_owner.clone());

    assert_eq!(Owner::<T>::get(), Some(new_owner));
  }

  #[benchmark]
  fn add_trusted() {
    let owner = installed_owner::<T>();
    let who: T::AccountId = account("operator", 0, 0);

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), who.clone());

    assert!(Pallet::<T>::is_trusted(&who));
  }

  #[benchmark]
  fn remove_trusted() {
    let owner = installed_owner::<T>();
    let who: T::AccountId = account("operator", 0, 0);
    TrustedOperators::<T>::insert(&who, ());

    #[extrinsic_call]
    _(RawOrigin::Signed(owner), who.clone());

    assert!(!Pallet::<T>::is_trusted(&who));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
