//! Mock ledger for HTLC integration tests.
//!
//! Tracks balances per `(address, token)`, a momentum clock and the spork
//! registry. A call runs both phases: validation first, then escrow of the
//! attached funds into the contract and execution. A rejected execution
//! refunds the sender; emitted `ContractSend` blocks are credited to their
//! recipients.

#![allow(dead_code)]

use embedded_htlc::abi::{
    CreateHtlcParam, ReclaimHtlcParam, UnlockHtlcParam, ALLOW_PROXY_UNLOCK_METHOD,
    DENY_PROXY_UNLOCK_METHOD,
};
use embedded_htlc::{
    HashType, HtlcApi, HtlcConfig, HtlcContract, HtlcError, InMemorySporkOracle, LedgerContext,
};
use parking_lot::RwLock;
use sha2::Sha256;
use sha3::{Digest, Sha3_256};
use shared_storage::{InMemoryKVStore, KeyValueReader, ScanResult};
use shared_types::{
    AccountBlock, Address, BlockType, Hash, Momentum, TokenStandard, U256, ZNN_TOKEN_STANDARD,
};
use std::collections::HashMap;
use std::sync::Arc;

pub const ALICE: Address = Address([0xa1; 20]);
pub const BOB: Address = Address([0xb0; 20]);
pub const CAROL: Address = Address([0xc0; 20]);

pub const GENESIS_TIME: i64 = 1_000_000_000;
pub const INITIAL_BALANCE: u64 = 1_000;

pub fn sha3_lock(preimage: &[u8]) -> Vec<u8> {
    Sha3_256::digest(preimage).to_vec()
}

pub fn sha256_lock(preimage: &[u8]) -> Vec<u8> {
    Sha256::digest(preimage).to_vec()
}

pub struct MockLedger {
    pub store: Arc<RwLock<InMemoryKVStore>>,
    pub contract: HtlcContract,
    pub api: HtlcApi<InMemoryKVStore>,
    pub sporks: Arc<InMemorySporkOracle>,
    balances: HashMap<(Address, TokenStandard), U256>,
    momentum: Momentum,
    nonce: u64,
}

impl MockLedger {
    /// Ledger with the HTLC spork active and every test account funded.
    pub fn new() -> Self {
        let ledger = Self::without_spork();
        ledger.sporks.activate(ledger.contract.config().htlc_spork_id);
        ledger
    }

    /// Ledger where the HTLC spork was never activated.
    pub fn without_spork() -> Self {
        ledger_telemetry::init_test_tracing();

        let config = HtlcConfig::default();
        let store = Arc::new(RwLock::new(InMemoryKVStore::new()));
        let sporks = Arc::new(InMemorySporkOracle::new());
        let contract = HtlcContract::with_spork_oracle(config.clone(), sporks.clone());
        let api = HtlcApi::new(store.clone(), config);

        let mut ledger = Self {
            store,
            contract,
            api,
            sporks,
            balances: HashMap::new(),
            momentum: Momentum {
                height: 1,
                hash: Hash([1u8; 32]),
                timestamp: GENESIS_TIME,
            },
            nonce: 0,
        };
        for account in [ALICE, BOB, CAROL] {
            ledger.fund(account, ZNN_TOKEN_STANDARD, INITIAL_BALANCE);
        }
        ledger
    }

    pub fn fund(&mut self, address: Address, token: TokenStandard, amount: u64) {
        *self.balances.entry((address, token)).or_default() += U256::from(amount);
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.balance_of(address, ZNN_TOKEN_STANDARD)
    }

    pub fn balance_of(&self, address: Address, token: TokenStandard) -> U256 {
        self.balances.get(&(address, token)).copied().unwrap_or_default()
    }

    pub fn contract_balance(&self) -> U256 {
        self.balance(self.contract.address())
    }

    pub fn now(&self) -> i64 {
        self.momentum.timestamp
    }

    pub fn set_time(&mut self, timestamp: i64) {
        self.momentum.timestamp = timestamp;
    }

    /// Every raw key-value pair of the ledger store.
    pub fn snapshot(&self) -> ScanResult {
        self.store.read().prefix_scan(&[]).unwrap()
    }

    fn transfer(&mut self, from: Address, to: Address, token: TokenStandard, amount: U256) {
        let source = self.balances.entry((from, token)).or_default();
        assert!(*source >= amount, "insufficient balance on {from}");
        *source -= amount;
        *self.balances.entry((to, token)).or_default() += amount;
    }

    fn next_hash(&mut self, from: Address) -> Hash {
        self.nonce += 1;
        let mut hasher = Sha3_256::new();
        hasher.update(from.as_bytes());
        hasher.update(self.nonce.to_be_bytes());
        Hash(hasher.finalize().into())
    }

    /// Submit a send block from `from` to the contract.
    ///
    /// Returns the send block hash and the execution outcome. A block that
    /// fails validation is never admitted and moves no funds.
    pub fn call(
        &mut self,
        from: Address,
        amount: u64,
        token: TokenStandard,
        data: Vec<u8>,
    ) -> (Hash, Result<Vec<AccountBlock>, HtlcError>) {
        let contract_address = self.contract.address();
        let block = AccountBlock {
            block_type: BlockType::UserSend,
            hash: self.next_hash(from),
            address: from,
            to_address: contract_address,
            amount: U256::from(amount),
            token_standard: token,
            data,
        };

        if let Err(err) = self.contract.validate_send_block(&block) {
            return (block.hash, Err(err));
        }
        self.transfer(from, contract_address, token, block.amount);

        self.momentum.height += 1;
        let result = {
            let mut guard = self.store.write();
            let mut ctx = LedgerContext::new(&mut *guard, &contract_address, self.momentum);
            self.contract.receive_block(&mut ctx, &block)
        };

        match &result {
            Ok(outbound) => {
                for send in outbound {
                    assert_eq!(send.block_type, BlockType::ContractSend);
                    assert_eq!(send.address, contract_address);
                    self.transfer(contract_address, send.to_address, send.token_standard, send.amount);
                }
            }
            Err(_) => self.transfer(contract_address, from, token, block.amount),
        }
        (block.hash, result)
    }

    pub fn create(
        &mut self,
        from: Address,
        amount: u64,
        hash_locked: Address,
        expiration_time: i64,
        hash_type: HashType,
        key_max_size: u8,
        hash_lock: Vec<u8>,
    ) -> Result<Hash, HtlcError> {
        let data = CreateHtlcParam {
            hash_locked,
            expiration_time,
            hash_type: hash_type.tag(),
            key_max_size,
            hash_lock,
        }
        .encode()
        .unwrap();
        let (id, result) = self.call(from, amount, ZNN_TOKEN_STANDARD, data);
        result.map(|outbound| {
            assert!(outbound.is_empty());
            id
        })
    }

    /// `CreateHtlc` of `amount` from ALICE to BOB, locked with SHA3 of `preimage`.
    pub fn create_default(&mut self, amount: u64, expiration_time: i64, preimage: &[u8]) -> Result<Hash, HtlcError> {
        self.create(
            ALICE,
            amount,
            BOB,
            expiration_time,
            HashType::Sha3,
            32,
            sha3_lock(preimage),
        )
    }

    pub fn reclaim(&mut self, from: Address, id: Hash) -> Result<Vec<AccountBlock>, HtlcError> {
        let data = ReclaimHtlcParam { id }.encode().unwrap();
        self.call(from, 0, ZNN_TOKEN_STANDARD, data).1
    }

    pub fn unlock(&mut self, from: Address, id: Hash, preimage: &[u8]) -> Result<Vec<AccountBlock>, HtlcError> {
        let data = UnlockHtlcParam {
            id,
            preimage: preimage.to_vec(),
        }
        .encode()
        .unwrap();
        self.call(from, 0, ZNN_TOKEN_STANDARD, data).1
    }

    pub fn allow_proxy_unlock(&mut self, from: Address) -> Result<Vec<AccountBlock>, HtlcError> {
        let data = ALLOW_PROXY_UNLOCK_METHOD.encode_call(&[]).unwrap();
        self.call(from, 0, ZNN_TOKEN_STANDARD, data).1
    }

    pub fn deny_proxy_unlock(&mut self, from: Address) -> Result<Vec<AccountBlock>, HtlcError> {
        let data = DENY_PROXY_UNLOCK_METHOD.encode_call(&[]).unwrap();
        self.call(from, 0, ZNN_TOKEN_STANDARD, data).1
    }
}
