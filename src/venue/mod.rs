/// Venue Layer
///
/// External collaborators the router settles against:
/// - `Chain`: native and token balances, allowances, and a journal so a whole
///   call can be rolled back
/// - `AmmRouter`: swap-exact-input and quote operations of the external AMM
///
/// `InMemoryChain` and `ConstantProductAmm` are in-process implementations
/// used for simulation, tests and benches.
pub mod constant_product;
pub mod in_memory_chain;

use crate::errors::{AmmError, TransferError};
use alloy_primitives::{Address, U256};

pub use constant_product::ConstantProductAmm;
pub use in_memory_chain::InMemoryChain;

/// Position in the chain journal returned by [`Chain::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(pub(crate) usize);

pub trait Chain {
    fn native_balance(&self, account: Address) -> U256;

    fn token_balance(&self, token: Address, account: Address) -> U256;

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256;

    fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> Result<(), TransferError>;

    fn transfer_token(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<(), TransferError>;

    /// Moves `amount` of `token` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_token_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError>;

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256);

    fn checkpoint(&mut self) -> Checkpoint;

    /// Undoes every change made since `checkpoint` and closes it.
    fn revert_to(&mut self, checkpoint: Checkpoint);

    /// Keeps the changes made since `checkpoint` and closes it. Checkpoints
    /// close innermost first.
    fn commit(&mut self, checkpoint: Checkpoint);
}

/// Arguments of a swap-exact-input call.
#[derive(Debug, Clone)]
pub struct AmmSwap {
    /// Account paying the input
    pub sender: Address,
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub to: Address,
    pub deadline: U256,
    pub timestamp: u64,
}

pub trait AmmRouter {
    fn address(&self) -> Address;

    /// Amounts along `path`, first element is `amount_in`.
    fn get_amounts_out(&self, chain: &dyn Chain, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, AmmError>;

    /// Swaps native `swap.amount_in` held by `swap.sender` for tokens delivered to `swap.to`.
    fn swap_exact_eth_for_tokens(&self, chain: &mut dyn Chain, swap: &AmmSwap) -> Result<Vec<U256>, AmmError>;

    /// Swaps tokens pulled from `swap.sender` (via allowance) for native delivered to `swap.to`.
    fn swap_exact_tokens_for_eth(&self, chain: &mut dyn Chain, swap: &AmmSwap) -> Result<Vec<U256>, AmmError>;
}
