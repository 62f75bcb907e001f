//! Single-transaction admission
//!
//! Two entry points, both boolean:
//!
//! - [`TxValidator::check_created_transaction`]: a shard or directory
//!   node applying a transaction drawn from its own pool; on success
//!   the transaction is tentatively applied to the caller's account
//!   snapshot and the receipt is stamped with the current epoch.
//! - [`TxValidator::check_created_transaction_from_lookup`]: a pure
//!   admission check for transactions forwarded by a lookup node; no
//!   state is touched.
//!
//! Lookup nodes themselves are not expected to call either; when the
//! role flag says so, both return true and warn rather than judge what
//! they cannot.

use tracing::{debug, warn};

use meridian_types::{shard_of, Transaction, TxReceipt};

use crate::accounts::{AccountView, TempAccountStore};
use crate::crypto::CryptoAdapter;
use crate::error::{ValidationError, ValidationResult};
use crate::{NodeView, ValidatorConfig};

/// Admission checks for individual transactions.
pub struct TxValidator<'a, C, A, N>
where
    C: CryptoAdapter + ?Sized,
    A: AccountView + ?Sized,
    N: NodeView + ?Sized,
{
    crypto: &'a C,
    accounts: &'a A,
    node: &'a N,
    config: ValidatorConfig,
}

impl<'a, C, A, N> TxValidator<'a, C, A, N>
where
    C: CryptoAdapter + ?Sized,
    A: AccountView + ?Sized,
    N: NodeView + ?Sized,
{
    pub fn new(crypto: &'a C, accounts: &'a A, node: &'a N, config: ValidatorConfig) -> Self {
        Self { crypto, accounts, node, config }
    }

    /// Verify the Schnorr signature over the transaction core fields.
    pub fn verify_transaction(&self, tx: &Transaction) -> bool {
        self.crypto
            .verify(&tx.serialize_core_fields(), &tx.signature, &tx.sender_pub_key)
    }

    /// Admission check for a transaction drawn from this node's own
    /// pool. On acceptance the transaction is tentatively applied to
    /// `store` and `receipt` is stamped with the current epoch.
    pub fn check_created_transaction<S>(
        &self,
        tx: &Transaction,
        receipt: &mut TxReceipt,
        store: &mut S,
    ) -> bool
    where
        S: TempAccountStore + ?Sized,
    {
        if self.config.lookup_node_mode {
            warn!("check_created_transaction not expected to be called on a lookup node");
            return true;
        }

        match self.check_created(tx, receipt, store) {
            Ok(()) => true,
            Err(reason) => {
                warn!(tx_id = %hex::encode(&tx.id()[..8]), %reason, "transaction rejected");
                false
            }
        }
    }

    fn check_created<S>(
        &self,
        tx: &Transaction,
        receipt: &mut TxReceipt,
        store: &mut S,
    ) -> ValidationResult<()>
    where
        S: TempAccountStore + ?Sized,
    {
        self.check_chain_id(tx)?;
        let sender = self.check_sender_address(tx)?;

        if !self.accounts.account_exists(&sender) {
            return Err(ValidationError::UnknownSender(sender));
        }

        let balance = self.accounts.balance(&sender);
        if balance < tx.amount {
            return Err(ValidationError::InsufficientBalance { balance, amount: tx.amount });
        }

        receipt.set_epoch(self.node.current_epoch());

        let accepted = store.update_accounts_temp(
            self.node.current_epoch(),
            self.node.num_shards(),
            !self.node.is_ds_idle(),
            tx,
            receipt,
        );
        if !accepted {
            return Err(ValidationError::TempStoreRejected);
        }

        debug!(tx_id = %hex::encode(&tx.id()[..8]), sender = %sender, "transaction admitted");
        Ok(())
    }

    /// Pure admission check for a transaction forwarded by a lookup
    /// node. Shard routing only applies while the directory service is
    /// idle, i.e. while this node acts as an ordinary shard node.
    pub fn check_created_transaction_from_lookup(&self, tx: &Transaction) -> bool {
        if self.config.lookup_node_mode {
            warn!("check_created_transaction_from_lookup not expected to be called on a lookup node");
            return true;
        }

        match self.check_from_lookup(tx) {
            Ok(()) => true,
            Err(reason) => {
                warn!(tx_id = %hex::encode(&tx.id()[..8]), %reason, "forwarded transaction rejected");
                false
            }
        }
    }

    fn check_from_lookup(&self, tx: &Transaction) -> ValidationResult<()> {
        self.check_chain_id(tx)?;
        let sender = self.check_sender_address(tx)?;

        if self.node.is_ds_idle() {
            let num_shards = self.node.num_shards();
            let sender_shard = shard_of(&sender, num_shards);
            if sender_shard != self.node.shard_id() {
                return Err(ValidationError::ShardMisroute {
                    sender_shard,
                    local_shard: self.node.shard_id(),
                });
            }

            if tx.is_contract_call() {
                let recipient_shard = shard_of(&tx.to_addr, num_shards);
                if recipient_shard != sender_shard {
                    return Err(ValidationError::CrossShardCall { sender_shard, recipient_shard });
                }
            }
        }

        let floor = self.node.min_gas_price();
        if tx.gas_price < floor {
            return Err(ValidationError::GasFloorViolation { got: tx.gas_price, floor });
        }

        if !self.verify_transaction(tx) {
            return Err(ValidationError::SignatureInvalid);
        }

        if !self.accounts.account_exists(&sender) {
            return Err(ValidationError::UnknownSender(sender));
        }

        let balance = self.accounts.balance(&sender);
        if balance < tx.amount {
            return Err(ValidationError::InsufficientBalance { balance, amount: tx.amount });
        }

        Ok(())
    }

    fn check_chain_id(&self, tx: &Transaction) -> ValidationResult<()> {
        if tx.chain_id() != self.config.chain_id {
            return Err(ValidationError::ChainIdMismatch {
                got: tx.chain_id(),
                expected: self.config.chain_id,
            });
        }
        Ok(())
    }

    fn check_sender_address(&self, tx: &Transaction) -> ValidationResult<meridian_types::Address> {
        let sender = tx.sender_address();
        if sender.is_null() {
            return Err(ValidationError::MalformedInput(
                "null sender address cannot issue transactions".into(),
            ));
        }
        Ok(sender)
    }
}
