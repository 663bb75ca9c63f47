//! `CreateHtlc`: lock the attached funds under a hash lock and a time lock.

use super::{ensure_canonical, CallContext, EmbeddedMethod};
use crate::abi::{CreateHtlcParam, Method, CREATE_HTLC_METHOD};
use crate::adapters::EntryStore;
use crate::domain::invariants::{
    invariant_digest_length, invariant_expiration_in_future, invariant_positive_amount,
};
use crate::domain::{HashType, HtlcEntry, HtlcError, PlasmaCategory};
use shared_types::AccountBlock;
use tracing::debug;

/// Handler of `CreateHtlc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateHtlcMethod;

impl CreateHtlcMethod {
    fn parse(block: &AccountBlock) -> Result<(CreateHtlcParam, HashType), HtlcError> {
        let param = CreateHtlcParam::decode(&block.data).map_err(HtlcError::call_encoding)?;
        let hash_type = HashType::try_from(param.hash_type)?;
        invariant_digest_length(hash_type, &param.hash_lock)?;

        let canonical = param.encode().map_err(HtlcError::call_encoding)?;
        ensure_canonical(&block.data, &canonical)?;
        Ok((param, hash_type))
    }
}

impl EmbeddedMethod for CreateHtlcMethod {
    fn method(&self) -> &'static Method {
        &CREATE_HTLC_METHOD
    }

    fn plasma_category(&self) -> PlasmaCategory {
        PlasmaCategory::EmbeddedSimple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<Vec<u8>, HtlcError> {
        Self::parse(block)?;
        Ok(block.data.clone())
    }

    fn receive_block(
        &self,
        ctx: &mut CallContext<'_>,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>, HtlcError> {
        let (param, hash_type) = Self::parse(send_block)
            .inspect_err(|err| debug!(%err, "invalid create - syntactic validation failed"))?;

        invariant_positive_amount(&send_block.amount)
            .inspect_err(|_| debug!("invalid create - cannot create zero amount"))?;

        let now = ctx.momentum.timestamp;
        invariant_expiration_in_future(param.expiration_time, now).inspect_err(|_| {
            debug!(
                expiration_time = param.expiration_time,
                now, "invalid create - cannot create already expired"
            )
        })?;

        let entry = HtlcEntry {
            id: send_block.hash,
            time_locked: send_block.address,
            hash_locked: param.hash_locked,
            token_standard: send_block.token_standard,
            amount: send_block.amount,
            expiration_time: param.expiration_time,
            hash_type,
            key_max_size: param.key_max_size,
            hash_lock: param.hash_lock,
        };
        EntryStore::new(&mut *ctx.store).insert(&entry)?;

        debug!(
            id = %entry.id,
            time_locked = %entry.time_locked,
            hash_locked = %entry.hash_locked,
            token_standard = %entry.token_standard,
            amount = %entry.amount,
            expiration_time = entry.expiration_time,
            hash_type = %entry.hash_type,
            key_max_size = entry.key_max_size,
            "created"
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::hash_verifier;
    use crate::domain::LockType;
    use crate::methods::test_support::{momentum, send_block, CONTRACT};
    use shared_storage::InMemoryKVStore;
    use shared_types::{Address, U256};

    const ALICE: Address = Address([0xa1; 20]);
    const BOB: Address = Address([0xb0; 20]);

    fn create_data(expiration_time: i64, hash_type: u8, hash_lock: Vec<u8>) -> Vec<u8> {
        CreateHtlcParam {
            hash_locked: BOB,
            expiration_time,
            hash_type,
            key_max_size: 32,
            hash_lock,
        }
        .encode()
        .unwrap()
    }

    fn run(kv: &mut InMemoryKVStore, block: &AccountBlock, now: i64) -> Result<Vec<AccountBlock>, HtlcError> {
        let mut ctx = CallContext {
            store: kv,
            momentum: momentum(now),
            contract_address: CONTRACT,
        };
        CreateHtlcMethod.receive_block(&mut ctx, block)
    }

    #[test]
    fn test_validate_accepts_canonical_call() {
        let data = create_data(1_300, 0, hash_verifier::digest(HashType::Sha3, b"secret"));
        let block = send_block(ALICE, 10, data.clone());
        assert_eq!(CreateHtlcMethod.validate_send_block(&block).unwrap(), data);
    }

    #[test]
    fn test_validate_rejects_unknown_hash_type() {
        let block = send_block(ALICE, 10, create_data(1_300, 2, vec![0u8; 32]));
        assert_eq!(
            CreateHtlcMethod.validate_send_block(&block),
            Err(HtlcError::InvalidHashType(2))
        );
    }

    #[test]
    fn test_validate_rejects_short_digest() {
        let block = send_block(ALICE, 10, create_data(1_300, 1, vec![0u8; 20]));
        assert!(matches!(
            CreateHtlcMethod.validate_send_block(&block),
            Err(HtlcError::InvalidHashDigestLength { expected: 32, got: 20 })
        ));
    }

    #[test]
    fn test_validate_rejects_trailing_bytes() {
        let mut data = create_data(1_300, 0, vec![0u8; 32]);
        data.extend_from_slice(&[0u8; 32]);
        let block = send_block(ALICE, 10, data);
        assert!(matches!(
            CreateHtlcMethod.validate_send_block(&block),
            Err(HtlcError::InvalidCallEncoding { .. })
        ));
    }

    #[test]
    fn test_create_persists_entry_and_refs() {
        let mut kv = InMemoryKVStore::new();
        let lock = hash_verifier::digest(HashType::Sha256, b"secret");
        let block = send_block(ALICE, 10, create_data(1_300, 1, lock.clone()));

        let outbound = run(&mut kv, &block, 1_000).unwrap();
        assert!(outbound.is_empty());

        let store = EntryStore::new(&kv);
        let entry = store.get(&block.hash).unwrap().unwrap();
        assert_eq!(entry.time_locked, ALICE);
        assert_eq!(entry.hash_locked, BOB);
        assert_eq!(entry.amount, U256::from(10));
        assert_eq!(entry.hash_type, HashType::Sha256);
        assert_eq!(entry.hash_lock, lock);
        assert_eq!(store.list_refs(LockType::TimeLocked, &ALICE).unwrap().len(), 1);
        assert_eq!(store.list_refs(LockType::HashLocked, &BOB).unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_zero_amount() {
        let mut kv = InMemoryKVStore::new();
        let block = send_block(ALICE, 0, create_data(1_300, 0, vec![0u8; 32]));
        assert_eq!(run(&mut kv, &block, 1_000), Err(HtlcError::InvalidTokenOrAmount));
        assert!(kv.is_empty());
    }

    #[test]
    fn test_create_rejects_expiration_at_now() {
        let mut kv = InMemoryKVStore::new();
        let block = send_block(ALICE, 10, create_data(1_000, 0, vec![0u8; 32]));
        assert!(matches!(
            run(&mut kv, &block, 1_000),
            Err(HtlcError::InvalidExpirationTime { expiration_time: 1_000, now: 1_000 })
        ));
        assert!(kv.is_empty());
    }
}
