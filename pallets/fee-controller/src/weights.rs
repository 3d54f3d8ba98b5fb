#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn initialize() -> Weight;
  fn create_fee_tier() -> Weight;
  fn set_factory_owner() -> Weight;
  fn set_protocol_fee() -> Weight;
  fn set_maker() -> Weight;
  fn set_factory() -> Weight;
  fn apply_protocol_fee(n: u32) -> Weight;
  fn collect_fees(n: u32) -> Weight;
  fn do_action(l: u32) -> Weight;
  fn transfer_ownership() -> Weight;
  fn add_trusted() -> Weight;
  fn remove_trusted() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
  fn initialize() -> Weight {
    Weight::from_parts(18_000_000, 1500)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(6))
  }

  fn create_fee_tier() -> Weight {
    Weight::from_parts(30_000_000, 3000)
      .saturating_add(T::DbWeight::get().reads(4))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_factory_owner() -> Weight {
    Weight::from_parts(25_000_000, 2500)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_protocol_fee() -> Weight {
    Weight::from_parts(10_000_000, 1000)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_maker() -> Weight {
    Weight::from_parts(10_000_000, 1000)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_factory() -> Weight {
    Weight::from_parts(10_000_000, 1000)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn apply_protocol_fee(n: u32) -> Weight {
    Weight::from_parts(12_000_000, 1500)
      .saturating_add(Weight::from_parts(20_000_000, 2500).saturating_mul(n.into()))
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().reads(2_u64.saturating_mul(n.into())))
      .saturating_add(T::DbWeight::get().writes(n.into()))
  }

  fn collect_fees(n: u32) -> Weight {
    Weight::from_parts(12_000_000, 1500)
      .saturating_add(Weight::from_parts(45_000_000, 5000).saturating_mul(n.into()))
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().reads(3_u64.saturating_mul(n.into())))
      .saturating_add(T::DbWeight::get().writes(3_u64.saturating_mul(n.into())))
  }

  fn do_action(l: u32) -> Weight {
    Weight::from_parts(40_000_000, 4000)
      .saturating_add(Weight::from_parts(2_000, 0).saturating_mul(l.into()))
      .saturating_add(T::DbWeight::get().reads(4))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  fn transfer_ownership() -> Weight {
    Weight::from_parts(12_000_000, 1000)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn add_trusted() -> Weight {
    Weight::from_parts(12_000_000, 1200)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  fn remove_trusted() -> Weight {
    Weight::from_parts(12_000_000, 1200)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(2))
  }
}

impl WeightInfo for () {
  fn initialize() -> Weight {
    Weight::from_parts(18_000_000, 1500)
      .saturating_add(RocksDbWeight::get().reads(2))
      .saturating_add(RocksDbWeight::get().writes(6))
  }

  fn create_fee_tier() -> Weight {
    Weight::from_parts(30_000_000, 3000)
  }

  fn set_factory_owner() -> Weight {
    Weight::from_parts(25_000_000, 2500)
  }

  fn set_protocol_fee() -> Weight {
    Weight::from_parts(10_000_000, 1000)
  }

  fn set_maker() -> Weight {
    Weight::from_parts(10_000_000, 1000)
  }

  fn set_factory() -> Weight {
    Weight::from_parts(10_000_000, 1000)
  }

  fn apply_protocol_fee(n: u32) -> Weight {
    Weight::from_parts(12_000_000, 1500)
      .saturating_add(Weight::from_parts(20_000_000, 2500).saturating_mul(n.into()))
  }

  fn collect_fees(n: u32) -> Weight {
    Weight::from_parts(12_000_000, 1500)
      .saturating_add(Weight::from_parts(45_000_000, 5000).saturating_mul(n.into()))
  }

  fn do_action(l: u32) -> Weight {
    Weight::from_parts(40_000_000, 4000)
      .saturating_add(Weight::from_parts(2_000, 0).saturating_mul(l.into()))
  }

  fn transfer_ownership() -> Weight {
    Weight::from_parts(12_000_000, 1000)
  }

  fn add_trusted() -> Weight {
    Weight::from_parts(12_000_000, 1200)
  }

  fn remove_trusted() -> Weight {
    Weight::from_parts(12_000_000, 1200)
  }
}
