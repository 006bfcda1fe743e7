use super::fee::FeeSplit;
use super::types::Quote;
use crate::errors::{AmmError, RouterError};
use crate::venue::{AmmRouter, Chain};
use alloy_primitives::{Address, U256};
use tracing::debug;

/// Read-only estimation of swap output and protocol fee.
///
/// Uses the same fee split as the executor so an estimate is exact for
/// unchanged reserves. The fee is always denominated in the native asset: taken
/// from the input on a buy and from the AMM proceeds on a sell.
pub struct QuoteEngine<'a, A: AmmRouter + ?Sized> {
    amm: &'a A,
    wrapped_native: Address,
    fee_bps: U256,
}

impl<'a, A: AmmRouter + ?Sized> QuoteEngine<'a, A> {
    pub fn new(amm: &'a A, wrapped_native: Address, fee_bps: U256) -> Self {
        Self { amm, wrapped_native, fee_bps }
    }

    pub fn estimate_buy(&self, chain: &dyn Chain, token: Address, native_in: U256) -> Result<Quote, RouterError> {
        let split = FeeSplit::new(native_in, self.fee_bps).ok_or(RouterError::InvalidOrder)?;
        let amounts = self.amm.get_amounts_out(chain, split.net, &[self.wrapped_native, token])?;
        let amount_out = last_amount(&amounts)?;

        debug!(%token, %native_in, fee = %split.fee, %amount_out, "estimated buy");
        Ok(Quote { amount_out, fee: split.fee })
    }

    pub fn estimate_sell(&self, chain: &dyn Chain, token: Address, token_in: U256) -> Result<Quote, RouterError> {
        let amounts = self.amm.get_amounts_out(chain, token_in, &[token, self.wrapped_native])?;
        let proceeds = last_amount(&amounts)?;
        let split = FeeSplit::new(proceeds, self.fee_bps).ok_or(RouterError::InvalidOrder)?;

        debug!(%token, %token_in, %proceeds, fee = %split.fee, "estimated sell");
        Ok(Quote { amount_out: split.net, fee: split.fee })
    }
}

pub(crate) fn last_amount(amounts: &[U256]) -> Result<U256, RouterError> {
    amounts.last().copied().ok_or(RouterError::SwapFailed(AmmError::InvalidPath))
}
