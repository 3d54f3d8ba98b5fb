//! Fee Controller Pallet
//!
//! Administrative layer in front of an external concentrated-liquidity pool
//! factory. An owner configures fee tiers, the pending protocol fee and the
//! treasury ("maker"); the owner or a trusted operator pushes the protocol fee
//! to many pools and sweeps their accrued protocol fees to the maker in one
//! atomic call.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::{ActionExecutor, FactoryOps, PoolOps, TransferAndDispatch};

pub mod authority;
pub use authority::Capability;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

const LOG_TARGET: &str = "runtime::fee-controller";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId, PoolId> {
  /// A factory owned by `controller` that accepts any new fee tier.
  fn setup_factory(controller: &AccountId) -> AccountId;
  /// A pool accepting protocol fee updates and collections from `controller`,
  /// with non-zero protocol fees accrued on both legs.
  fn setup_pool(controller: &AccountId, index: u32) -> PoolId;
  /// A payload the runtime's `ActionExecutor` will accept, padded to `len` bytes
  /// where the encoding allows it.
  fn action_payload(len: u32) -> alloc::vec::Vec<u8>;
}

#[frame::pallet]
pub mod pallet {
  use super::{ActionExecutor, Capability, FactoryOps, LOG_TARGET, PoolOps, WeightInfo};
  use alloc::vec::Vec;
  use frame::prelude::*;
  use polkadot_sdk::{
    frame_support::{
      PalletId,
      storage::{TransactionOutcome, with_transaction},
    },
    sp_runtime::traits::{AccountIdConversion, AtLeast32BitUnsigned, Hash, TrailingZeroInput},
  };

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Opaque reference to an external pool
    type PoolId: Parameter + Member + MaxEncodedLen;

    /// Amounts accrued by pools and native value forwarded by `do_action`
    type Balance: Parameter
      + Member
      + AtLeast32BitUnsigned
      + Default
      + Copy
      + MaybeSerializeDeserialize
      + MaxEncodedLen;

    /// The external pool factory
    type PoolFactory: FactoryOps<Self::AccountId>;

    /// The external pools
    type Pools: PoolOps<Self::AccountId, Self::PoolId, Self::Balance>;

    /// Target of the owner-only escape hatch
    type ActionExecutor: ActionExecutor<Self::AccountId, Self::Balance>;

    /// Origin allowed to initialize a controller that has no owner yet
    type InitializeOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Derives the account the controller acts as against the factory and pools
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Upper bound on pools named in one batch call
    #[pallet::constant]
    type MaxPoolsPerBatch: Get<u32>;

    /// Upper bound on the `do_action` payload length
    #[pallet::constant]
    type MaxActionPayload: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId, Self::PoolId>;
  }

  pub type PoolsOf<T> = BoundedVec<<T as Config>::PoolId, <T as Config>::MaxPoolsPerBatch>;
  pub type PayloadOf<T> = BoundedVec<u8, <T as Config>::MaxActionPayload>;

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Sole holder of every owner capability
  #[pallet::storage]
  #[pallet::getter(fn owner)]
  pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Accounts allowed to run batch fee operations
  #[pallet::storage]
  pub type TrustedOperators<T: Config> =
    CountedStorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// The pool factory fee tiers are created on
  #[pallet::storage]
  #[pallet::getter(fn factory)]
  pub type Factory<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Recipient of collected protocol fees
  #[pallet::storage]
  #[pallet::getter(fn maker)]
  pub type Maker<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Protocol fee the next `apply_protocol_fee` writes to both legs of every pool
  #[pallet::storage]
  #[pallet::getter(fn protocol_fee)]
  pub type ProtocolFee<T> = StorageValue<_, u8, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Controller configured from scratch
    Initialized {
      owner: T::AccountId,
      operator: T::AccountId,
      factory: T::AccountId,
      maker: T::AccountId,
      protocol_fee: u8,
    },
    OwnershipTransferred {
      old_owner: T::AccountId,
      new_owner: T::AccountId,
    },
    TrustedOperatorAdded {
      who: T::AccountId,
    },
    TrustedOperatorRemoved {
      who: T::AccountId,
    },
    /// Fee tier enabled on the external factory
    FeeTierCreated {
      factory: T::AccountId,
      fee: u32,
      tick_spacing: i32,
    },
    /// External factory handed to a new owner; the controller no longer owns it
    FactoryOwnerSet {
      factory: T::AccountId,
      new_owner: T::AccountId,
    },
    ProtocolFeeSet {
      old: u8,
      new: u8,
    },
    MakerSet {
      old: Option<T::AccountId>,
      new: T::AccountId,
    },
    FactorySet {
      old: Option<T::AccountId>,
      new: T::AccountId,
    },
    /// Protocol fee written to both legs of a pool
    ProtocolFeeApplied {
      pool: T::PoolId,
      fee_protocol: u8,
    },
    /// Accrued protocol fees swept from a pool to the maker
    ProtocolFeesCollected {
      pool: T::PoolId,
      recipient: T::AccountId,
      amount_0: T::Balance,
      amount_1: T::Balance,
    },
    /// Escape hatch used; `payload_hash` identifies the exact bytes forwarded
    ActionExecuted {
      target: T::AccountId,
      value: T::Balance,
      payload_hash: T::Hash,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Signer lacks the capability the call requires
    Unauthorized,
    /// The factory, a pool or the action target rejected the call
    ExternalCallFailed,
    /// Refused identity for the role it was given
    InvalidConfiguration,
    /// An owner is already set
    AlreadyInitialized,
    /// No factory configured
    FactoryNotSet,
    /// No maker configured
    MakerNotSet,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Set owner, first trusted operator, factory, maker and protocol fee in one go.
    ///
    /// Only usable while no owner exists; after that every field has its own
    /// owner-gated setter.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::initialize())]
    pub fn initialize(
      origin: OriginFor<T>,
      owner: T::AccountId,
      operator: T::AccountId,
      factory: T::AccountId,
      maker: T::AccountId,
      protocol_fee: u8,
    ) -> DispatchResult {
      T::InitializeOrigin::ensure_origin(origin)?;
      ensure!(Owner::<T>::get().is_none(), Error::<T>::AlreadyInitialized);
      ensure!(
        Self::is_valid_owner(&owner),
        Error::<T>::InvalidConfiguration
      );
      Owner::<T>::put(&owner);
      TrustedOperators::<T>::insert(&operator, ());
      Factory::<T>::put(&factory);
      Maker::<T>::put(&maker);
      ProtocolFee::<T>::put(protocol_fee);
      Self::deposit_event(Event::Initialized {
        owner,
        operator,
        factory,
        maker,
        protocol_fee,
      });
      Ok(())
    }

    /// Enable a fee tier on the factory. Arguments are passed through untouched;
    /// the factory alone decides whether they are acceptable.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::create_fee_tier())]
    pub fn create_fee_tier(origin: OriginFor<T>, fee: u32, tick_spacing: i32) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      let factory = Factory::<T>::get().ok_or(Error::<T>::FactoryNotSet)?;
      log::debug!(
        target: LOG_TARGET,
        "enabling fee tier {fee} with tick spacing {tick_spacing}"
      );
      T::PoolFactory::enable_fee_amount(&Self::account_id(), &factory, fee, tick_spacing)
        .map_err(|e| Self::external_failure("enable_fee_amount", e))?;
      Self::deposit_event(Event::FeeTierCreated {
        factory,
        fee,
        tick_spacing,
      });
      Ok(())
    }

    /// Transfer ownership of the external factory.
    ///
    /// Once this succeeds the controller can no longer create fee tiers or
    /// touch pools until the new factory owner hands it back.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_factory_owner())]
    pub fn set_factory_owner(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      let factory = Factory::<T>::get().ok_or(Error::<T>::FactoryNotSet)?;
      T::PoolFactory::set_owner(&Self::account_id(), &factory, &new_owner)
        .map_err(|e| Self::external_failure("set_owner", e))?;
      log::info!(
        target: LOG_TARGET,
        "factory {factory:?} handed over to {new_owner:?}"
      );
      Self::deposit_event(Event::FactoryOwnerSet { factory, new_owner });
      Ok(())
    }

    /// Update the pending protocol fee. Pools only see it on the next
    /// `apply_protocol_fee`; out-of-range values surface there.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_protocol_fee())]
    pub fn set_protocol_fee(origin: OriginFor<T>, value: u8) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      let old = ProtocolFee::<T>::get();
      ProtocolFee::<T>::put(value);
      Self::deposit_event(Event::ProtocolFeeSet { old, new: value });
      Ok(())
    }

    /// Point collections at a new treasury.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_maker())]
    pub fn set_maker(origin: OriginFor<T>, maker: T::AccountId) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      let old = Maker::<T>::get();
      Maker::<T>::put(&maker);
      Self::deposit_event(Event::MakerSet { old, new: maker });
      Ok(())
    }

    /// Point fee tier administration at a different factory.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_factory())]
    pub fn set_factory(origin: OriginFor<T>, factory: T::AccountId) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      let old = Factory::<T>::get();
      Factory::<T>::put(&factory);
      Self::deposit_event(Event::FactorySet { old, new: factory });
      Ok(())
    }

    /// Write the current protocol fee to both legs of every listed pool.
    ///
    /// All or nothing: if any pool rejects the update, no pool keeps it.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::apply_protocol_fee(pools.len() as u32))]
    pub fn apply_protocol_fee(origin: OriginFor<T>, pools: PoolsOf<T>) -> DispatchResult {
      Self::ensure_capability(origin, Capability::OwnerOrTrusted)?;
      Self::do_apply_protocol_fee(&pools)
    }

    /// Sweep every listed pool's accrued protocol fees to the maker.
    ///
    /// All or nothing: if any pool fails, no pool is swept.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::collect_fees(pools.len() as u32))]
    pub fn collect_fees(origin: OriginFor<T>, pools: PoolsOf<T>) -> DispatchResult {
      Self::ensure_capability(origin, Capability::OwnerOrTrusted)?;
      Self::do_collect_fees(&pools)
    }

    /// Forward `value` and an opaque `payload` to `target` as the controller.
    ///
    /// Nothing about the payload is checked here. Use it for recovery work the
    /// typed calls cannot express.
    #[pallet::call_index(8)]
    #[pallet::weight(
      T::WeightInfo::do_action(payload.len() as u32)
        .saturating_add(T::ActionExecutor::weight(payload))
    )]
    pub fn do_action(
      origin: OriginFor<T>,
      target: T::AccountId,
      value: T::Balance,
      payload: PayloadOf<T>,
    ) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      let payload_hash = T::Hashing::hash(&payload);
      log::info!(
        target: LOG_TARGET,
        "do_action to {target:?}: value {value:?}, {} payload bytes, hash {payload_hash:?}",
        payload.len()
      );
      Self::atomically(|| {
        T::ActionExecutor::execute(&Self::account_id(), &target, value, &payload)
          .map_err(|e| Self::external_failure("do_action", e))
      })?;
      Self::deposit_event(Event::ActionExecuted {
        target,
        value,
        payload_hash,
      });
      Ok(())
    }

    /// Hand every owner capability to `new_owner`. The caller loses them at once.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::transfer_ownership())]
    pub fn transfer_ownership(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
      let old_owner = Self::ensure_capability(origin, Capability::Owner)?;
      ensure!(
        Self::is_valid_owner(&new_owner),
        Error::<T>::InvalidConfiguration
      );
      Owner::<T>::put(&new_owner);
      log::info!(
        target: LOG_TARGET,
        "ownership moved from {old_owner:?} to {new_owner:?}"
      );
      Self::deposit_event(Event::OwnershipTransferred {
        old_owner,
        new_owner,
      });
      Ok(())
    }

    /// Grant batch rights. Adding an existing operator changes nothing.
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::add_trusted())]
    pub fn add_trusted(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      if !TrustedOperators::<T>::contains_key(&who) {
        TrustedOperators::<T>::insert(&who, ());
        Self::deposit_event(Event::TrustedOperatorAdded { who });
      }
      Ok(())
    }

    /// Revoke batch rights. Removing a non-member changes nothing.
    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::remove_trusted())]
    pub fn remove_trusted(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      Self::ensure_capability(origin, Capability::Owner)?;
      if TrustedOperators::<T>::contains_key(&who) {
        TrustedOperators::<T>::remove(&who);
        Self::deposit_event(Event::TrustedOperatorRemoved { who });
      }
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Account the controller signs as towards the factory, pools and action targets
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn is_trusted(who: &T::AccountId) -> bool {
      TrustedOperators::<T>::contains_key(who)
    }

    pub fn trusted_operator_count() -> u32 {
      TrustedOperators::<T>::count()
    }

    /// Whether the signer of `origin` holds `capability`, returning the signer.
    pub fn ensure_capability(
      origin: OriginFor<T>,
      capability: Capability,
    ) -> Result<T::AccountId, DispatchError> {
      let who = ensure_signed(origin)?;
      let owner = Owner::<T>::get();
      // Membership is only read when the owner check alone cannot decide.
      let trusted = capability == Capability::OwnerOrTrusted
        && owner.as_ref() != Some(&who)
        && Self::is_trusted(&who);
      ensure!(
        capability.permits(&who, owner.as_ref(), trusted),
        Error::<T>::Unauthorized
      );
      Ok(who)
    }

    /// Set the current protocol fee on every pool, in order, inside one
    /// storage transaction. The fee is read once so every pool gets the same value.
    pub fn do_apply_protocol_fee(pools: &[T::PoolId]) -> DispatchResult {
      let fee_protocol = ProtocolFee::<T>::get();
      let controller = Self::account_id();
      Self::atomically(|| {
        for pool in pools {
          log::debug!(
            target: LOG_TARGET,
            "setting protocol fee {fee_protocol} on {pool:?}"
          );
          T::Pools::set_fee_protocol(&controller, pool, fee_protocol, fee_protocol)
            .map_err(|e| Self::external_failure("set_fee_protocol", e))?;
          Self::deposit_event(Event::ProtocolFeeApplied {
            pool: pool.clone(),
            fee_protocol,
          });
        }
        Ok(())
      })
    }

    /// Sweep every pool to the maker, in order, inside one storage transaction.
    /// Each pool is swept by exactly the amounts it reported in the same step.
    pub fn do_collect_fees(pools: &[T::PoolId]) -> DispatchResult {
      if pools.is_empty() {
        return Ok(());
      }
      let recipient = Maker::<T>::get().ok_or(Error::<T>::MakerNotSet)?;
      let controller = Self::account_id();
      Self::atomically(|| {
        for pool in pools {
          let (owed_0, owed_1) =
            T::Pools::protocol_fees(pool).map_err(|e| Self::external_failure("protocol_fees", e))?;
          log::debug!(
            target: LOG_TARGET,
            "collecting {owed_0:?}/{owed_1:?} from {pool:?}"
          );
          let (amount_0, amount_1) =
            T::Pools::collect_protocol(&controller, pool, &recipient, owed_0, owed_1)
              .map_err(|e| Self::external_failure("collect_protocol", e))?;
          Self::deposit_event(Event::ProtocolFeesCollected {
            pool: pool.clone(),
            recipient: recipient.clone(),
            amount_0,
            amount_1,
          });
        }
        Ok(())
      })
    }

    /// Run `f` in a storage layer that is discarded when it fails.
    fn atomically<R>(f: impl FnOnce() -> Result<R, DispatchError>) -> Result<R, DispatchError> {
      with_transaction(|| match f() {
        Ok(value) => TransactionOutcome::Commit(Ok(value)),
        Err(e) => TransactionOutcome::Rollback(Err(e)),
      })
    }

    fn external_failure(operation: &'static str, error: DispatchError) -> DispatchError {
      log::warn!(
        target: LOG_TARGET,
        "{operation} failed: {error:?}"
      );
      Error::<T>::ExternalCallFailed.into()
    }

    /// Rejects the all-zero account and the controller's own account, neither of
    /// which can ever sign again.
    fn is_valid_owner(who: &T::AccountId) -> bool {
      let null = T::AccountId::decode(&mut TrailingZeroInput::zeroes()).ok();
      null.as_ref() != Some(who) && *who != Self::account_id()
    }
  }

  #[pallet::genesis_config]
  #[derive(DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub owner: Option<T::AccountId>,
    pub trusted_operators: Vec<T::AccountId>,
    pub factory: Option<T::AccountId>,
    pub maker: Option<T::AccountId>,
    pub protocol_fee: u8,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      if let Some(owner) = &self.owner {
        assert!(
          Pallet::<T>::is_valid_owner(owner),
          "fee controller owner must be a signing account"
        );
        Owner::<T>::put(owner);
      }
      for operator in &self.trusted_operators {
        TrustedOperators::<T>::insert(operator, ());
      }
      if let Some(factory) = &self.factory {
        Factory::<T>::put(factory);
      }
      if let Some(maker) = &self.maker {
        Maker::<T>::put(maker);
      }
      ProtocolFee::<T>::put(self.protocol_fee);
    }
  }
}
