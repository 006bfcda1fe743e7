use super::{AmmRouter, AmmSwap, Chain};
use crate::errors::AmmError;
use ahash::AHashMap;
use alloy_primitives::{Address, U256};

const POOL_FEE_DENOMINATOR: u64 = 10_000;

/// Uniswap V2 style router over native/token pairs.
///
/// Pair reserves are the pair account's balances in the chain state, so the
/// chain journal covers every reserve change a swap makes. The native side is
/// held unwrapped; the wrapped-native address only appears in swap paths.
#[derive(Debug, Clone)]
pub struct ConstantProductAmm {
    address: Address,
    wrapped_native: Address,
    // 30 for 0.3%
    fee_bps: u64,
    // token -> pair account
    pairs: AHashMap<Address, Address>,
}

enum Direction {
    NativeIn,
    TokenIn,
}

impl ConstantProductAmm {
    pub fn new(address: Address, wrapped_native: Address) -> Self {
        Self { address, wrapped_native, fee_bps: 30, pairs: AHashMap::new() }
    }

    pub fn with_fee_bps(self, fee_bps: u64) -> Self {
        Self { fee_bps: fee_bps.min(POOL_FEE_DENOMINATOR), ..self }
    }

    pub fn with_pair(mut self, token: Address, pair: Address) -> Self {
        self.pairs.insert(token, pair);
        self
    }

    pub fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    pub fn get_pair(&self, token: &Address) -> Option<Address> {
        self.pairs.get(token).copied()
    }

    /// (native reserve, token reserve) of the pair for `token`.
    pub fn get_reserves(&self, chain: &dyn Chain, token: Address) -> Result<(U256, U256), AmmError> {
        let pair = self.get_pair(&token).ok_or(AmmError::UnknownPair(token))?;
        Ok((chain.native_balance(pair), chain.token_balance(token, pair)))
    }

    /// amount_out = amount_in * (1 - fee) * reserve_out / (reserve_in + amount_in * (1 - fee))
    pub fn get_amount_out(&self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let amount_in_with_fee = amount_in.checked_mul(U256::from(POOL_FEE_DENOMINATOR - self.fee_bps)).ok_or(AmmError::Overflow)?;
        let numerator = amount_in_with_fee.checked_mul(reserve_out).ok_or(AmmError::Overflow)?;
        let denominator = reserve_in
            .checked_mul(U256::from(POOL_FEE_DENOMINATOR))
            .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
            .ok_or(AmmError::Overflow)?;

        Ok(numerator / denominator)
    }

    fn resolve_path(&self, path: &[Address]) -> Result<(Address, Address, Direction), AmmError> {
        let [from, to] = path else {
            return Err(AmmError::InvalidPath);
        };
        let (token, direction) = if *from == self.wrapped_native && *to != self.wrapped_native {
            (*to, Direction::NativeIn)
        } else if *to == self.wrapped_native && *from != self.wrapped_native {
            (*from, Direction::TokenIn)
        } else {
            return Err(AmmError::InvalidPath);
        };
        let pair = self.get_pair(&token).ok_or(AmmError::UnknownPair(token))?;
        Ok((token, pair, direction))
    }

    fn quote(&self, chain: &dyn Chain, amount_in: U256, path: &[Address]) -> Result<(Address, Address, Direction, U256), AmmError> {
        let (token, pair, direction) = self.resolve_path(path)?;
        let native_reserve = chain.native_balance(pair);
        let token_reserve = chain.token_balance(token, pair);
        let amount_out = match direction {
            Direction::NativeIn => self.get_amount_out(amount_in, native_reserve, token_reserve)?,
            Direction::TokenIn => self.get_amount_out(amount_in, token_reserve, native_reserve)?,
        };
        Ok((token, pair, direction, amount_out))
    }
}

fn check_deadline(swap: &AmmSwap) -> Result<(), AmmError> {
    if U256::from(swap.timestamp) > swap.deadline {
        return Err(AmmError::Expired);
    }
    Ok(())
}

fn check_output(amount_out: U256, amount_out_min: U256) -> Result<(), AmmError> {
    if amount_out < amount_out_min {
        return Err(AmmError::InsufficientOutputAmount { amount_out, amount_out_min });
    }
    Ok(())
}

impl AmmRouter for ConstantProductAmm {
    fn address(&self) -> Address {
        self.address
    }

    fn get_amounts_out(&self, chain: &dyn Chain, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, AmmError> {
        let (_, _, _, amount_out) = self.quote(chain, amount_in, path)?;
        Ok(vec![amount_in, amount_out])
    }

    fn swap_exact_eth_for_tokens(&self, chain: &mut dyn Chain, swap: &AmmSwap) -> Result<Vec<U256>, AmmError> {
        check_deadline(swap)?;
        let (token, pair, direction, amount_out) = self.quote(chain, swap.amount_in, &swap.path)?;
        if !matches!(direction, Direction::NativeIn) {
            return Err(AmmError::InvalidPath);
        }
        check_output(amount_out, swap.amount_out_min)?;

        chain.transfer_native(swap.sender, pair, swap.amount_in)?;
        chain.transfer_token(token, pair, swap.to, amount_out)?;
        Ok(vec![swap.amount_in, amount_out])
    }

    fn swap_exact_tokens_for_eth(&self, chain: &mut dyn Chain, swap: &AmmSwap) -> Result<Vec<U256>, AmmError> {
        check_deadline(swap)?;
        let (token, pair, direction, amount_out) = self.quote(chain, swap.amount_in, &swap.path)?;
        if !matches!(direction, Direction::TokenIn) {
            return Err(AmmError::InvalidPath);
        }
        check_output(amount_out, swap.amount_out_min)?;

        chain.transfer_token_from(token, self.address, swap.sender, pair, swap.amount_in)?;
        chain.transfer_native(pair, swap.to, amount_out)?;
        Ok(vec![swap.amount_in, amount_out])
    }
}
