//! Account state as the validators see it
//!
//! Read-only balance/existence lookups plus the tentative application
//! used while a node assembles a block from its own pool. Both are
//! caller-owned; the core never holds account state of its own.

use meridian_types::{Address, Transaction, TxReceipt};

/// Read-only projection of local account state.
pub trait AccountView {
    fn account_exists(&self, address: &Address) -> bool;

    /// Balance of `address`; zero for unknown accounts.
    fn balance(&self, address: &Address) -> u128;
}

/// A temporary account-store snapshot accepting tentative updates.
///
/// `update_accounts_temp` applies the transaction's amount and nonce
/// effects to the snapshot and reports whether the transaction is
/// acceptable. The caller owns rollback: dropping the snapshot undoes
/// everything.
pub trait TempAccountStore {
    fn update_accounts_temp(
        &mut self,
        epoch_num: u64,
        num_shards: u32,
        is_ds_node: bool,
        tx: &Transaction,
        receipt: &mut TxReceipt,
    ) -> bool;
}
