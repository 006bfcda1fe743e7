use super::{Chain, Checkpoint};
use crate::errors::TransferError;
use crate::utils::constants::NATIVE;
use ahash::{AHashMap, AHashSet};
use alloy_primitives::{Address, U256};

#[derive(Debug, Clone)]
enum JournalEntry {
    Balance { key: (Address, Address), previous: U256 },
    Allowance { key: (Address, Address, Address), previous: U256 },
}

/// Balance and allowance store with a change journal.
///
/// Native balances live under the [`NATIVE`] token key, so one map covers both
/// assets: (token, account) -> balance.
#[derive(Debug, Default)]
pub struct InMemoryChain {
    balances: AHashMap<(Address, Address), U256>,
    // (token, owner, spender) -> allowance
    allowances: AHashMap<(Address, Address, Address), U256>,
    rejects_native: AHashSet<Address>,
    // changes since the outermost open checkpoint
    journal: Vec<JournalEntry>,
    open_checkpoints: usize,
}

impl InMemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint_native(&mut self, account: Address, amount: U256) -> Result<(), TransferError> {
        self.mint_token(NATIVE, account, amount)
    }

    pub fn mint_token(&mut self, token: Address, account: Address, amount: U256) -> Result<(), TransferError> {
        let balance = self.balance_of(token, account).checked_add(amount).ok_or(TransferError::Overflow(account))?;
        self.set_balance(token, account, balance);
        Ok(())
    }

    /// Makes native transfers to `account` fail, like a contract without a payable fallback.
    pub fn set_rejects_native(&mut self, account: Address, rejects: bool) {
        if rejects {
            self.rejects_native.insert(account);
        } else {
            self.rejects_native.remove(&account);
        }
    }

    pub fn journal_len(&self) -> usize {
        self.journal.len()
    }

    fn balance_of(&self, token: Address, account: Address) -> U256 {
        self.balances.get(&(token, account)).copied().unwrap_or_default()
    }

    fn set_balance(&mut self, token: Address, account: Address, value: U256) {
        let key = (token, account);
        let previous = self.balances.insert(key, value).unwrap_or_default();
        self.record(JournalEntry::Balance { key, previous });
    }

    fn set_allowance(&mut self, key: (Address, Address, Address), value: U256) {
        let previous = self.allowances.insert(key, value).unwrap_or_default();
        self.record(JournalEntry::Allowance { key, previous });
    }

    // Nothing can be reverted outside a checkpoint, so nothing is kept.
    fn record(&mut self, entry: JournalEntry) {
        if self.open_checkpoints > 0 {
            self.journal.push(entry);
        }
    }

    fn close_checkpoint(&mut self) {
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
    }

    fn move_balance(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<(), TransferError> {
        let available = self.balance_of(token, from);
        if available < amount {
            return Err(TransferError::InsufficientBalance { account: from, available, required: amount });
        }
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let credited = self.balance_of(token, to).checked_add(amount).ok_or(TransferError::Overflow(to))?;
        self.set_balance(token, from, available - amount);
        self.set_balance(token, to, credited);
        Ok(())
    }
}

impl Chain for InMemoryChain {
    fn native_balance(&self, account: Address) -> U256 {
        self.balance_of(NATIVE, account)
    }

    fn token_balance(&self, token: Address, account: Address) -> U256 {
        self.balance_of(token, account)
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(token, owner, spender)).copied().unwrap_or_default()
    }

    fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> Result<(), TransferError> {
        if self.rejects_native.contains(&to) {
            return Err(TransferError::Rejected(to));
        }
        self.move_balance(NATIVE, from, to, amount)
    }

    fn transfer_token(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<(), TransferError> {
        self.move_balance(token, from, to, amount)
    }

    fn transfer_token_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError> {
        let available = self.allowance(token, from, spender);
        if available < amount {
            return Err(TransferError::InsufficientAllowance { owner: from, spender, available, required: amount });
        }
        self.move_balance(token, from, to, amount)?;
        // max allowance is treated as infinite
        if available != U256::MAX {
            self.set_allowance((token, from, spender), available - amount);
        }
        Ok(())
    }

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.set_allowance((token, owner, spender), amount);
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.open_checkpoints += 1;
        Checkpoint(self.journal.len())
    }

    fn revert_to(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.0 {
            match self.journal.pop() {
                Some(JournalEntry::Balance { key, previous }) => {
                    self.balances.insert(key, previous);
                }
                Some(JournalEntry::Allowance { key, previous }) => {
                    self.allowances.insert(key, previous);
                }
                None => break,
            }
        }
        self.close_checkpoint();
    }

    fn commit(&mut self, _checkpoint: Checkpoint) {
        // An inner commit keeps its entries so an enclosing revert still undoes them.
        self.close_checkpoint();
    }
}
