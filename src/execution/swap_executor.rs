use super::fee_ledger::FeeLedger;
use crate::errors::RouterError;
use crate::logic::quote_engine::last_amount;
use crate::logic::{CallContext, FeeSplit, SwapDirection, SwapOrder, SwapReceipt};
use crate::venue::{AmmRouter, AmmSwap, Chain};
use alloy_primitives::{Address, U256};
use tracing::debug;

/// Executes validated orders against the AMM and splits off the protocol fee.
///
/// Every ledger update happens before the external call that follows it. Each
/// order runs under its own chain checkpoint and ledger snapshot, so a failed
/// call leaves neither balances nor accrued fees changed.
pub struct SwapExecutor<'a, A: AmmRouter + ?Sized> {
    amm: &'a A,
    router: Address,
    wrapped_native: Address,
}

impl<'a, A: AmmRouter + ?Sized> SwapExecutor<'a, A> {
    pub fn new(amm: &'a A, router: Address, wrapped_native: Address) -> Self {
        Self { amm, router, wrapped_native }
    }

    /// Moves the attached value into the router. `required` is what the orders consume.
    pub fn escrow_value(&self, chain: &mut dyn Chain, ctx: &CallContext, required: U256) -> Result<(), RouterError> {
        if ctx.value < required {
            return Err(RouterError::InsufficientEth);
        }
        chain.transfer_native(ctx.caller, self.router, ctx.value).map_err(|_| RouterError::InsufficientEth)
    }

    /// Returns attached value beyond `spent` to the caller.
    pub fn refund_excess(&self, chain: &mut dyn Chain, ctx: &CallContext, spent: U256) -> Result<(), RouterError> {
        let excess = ctx.value.saturating_sub(spent);
        if excess.is_zero() {
            return Ok(());
        }
        chain.transfer_native(self.router, ctx.caller, excess).map_err(|_| RouterError::TransferEthFailed)
    }

    /// Buys with native already escrowed in the router: fee off the input, the rest to the AMM.
    pub fn buy(
        &self,
        chain: &mut dyn Chain,
        ledger: &mut FeeLedger,
        ctx: &CallContext,
        order: &SwapOrder,
    ) -> Result<SwapReceipt, RouterError> {
        atomically(chain, ledger, |chain, ledger| self.execute_buy(chain, ledger, ctx, order))
    }

    /// Sells the caller's tokens: full amount to the AMM, fee off the native proceeds.
    pub fn sell(
        &self,
        chain: &mut dyn Chain,
        ledger: &mut FeeLedger,
        ctx: &CallContext,
        order: &SwapOrder,
    ) -> Result<SwapReceipt, RouterError> {
        atomically(chain, ledger, |chain, ledger| self.execute_sell(chain, ledger, ctx, order))
    }

    fn execute_buy(
        &self,
        chain: &mut dyn Chain,
        ledger: &mut FeeLedger,
        ctx: &CallContext,
        order: &SwapOrder,
    ) -> Result<SwapReceipt, RouterError> {
        let split = FeeSplit::new(order.amount, ledger.fee_bps()).ok_or(RouterError::InvalidOrder)?;
        ledger.accrue(split.fee)?;

        let swap = AmmSwap {
            sender: self.router,
            amount_in: split.net,
            amount_out_min: order.amount_out_min,
            path: vec![self.wrapped_native, order.token_address],
            to: ctx.caller,
            deadline: order.deadline,
            timestamp: ctx.timestamp,
        };
        let amounts = self.amm.swap_exact_eth_for_tokens(chain, &swap)?;
        let amount_out = last_amount(&amounts)?;

        debug!(caller = %ctx.caller, token = %order.token_address, amount_in = %order.amount, fee = %split.fee, %amount_out, "buy executed");
        Ok(SwapReceipt {
            direction: SwapDirection::Buy,
            token_address: order.token_address,
            amount_in: order.amount,
            amount_out,
            fee: split.fee,
        })
    }

    fn execute_sell(
        &self,
        chain: &mut dyn Chain,
        ledger: &mut FeeLedger,
        ctx: &CallContext,
        order: &SwapOrder,
    ) -> Result<SwapReceipt, RouterError> {
        let token = order.token_address;
        chain
            .transfer_token_from(token, self.router, ctx.caller, self.router, order.amount)
            .map_err(|_| RouterError::TokenTransferFailed { token })?;
        chain.approve(token, self.router, self.amm.address(), order.amount);

        let swap = AmmSwap {
            sender: self.router,
            amount_in: order.amount,
            amount_out_min: order.amount_out_min,
            path: vec![token, self.wrapped_native],
            to: self.router,
            deadline: order.deadline,
            timestamp: ctx.timestamp,
        };
        let amounts = self.amm.swap_exact_tokens_for_eth(chain, &swap)?;
        let proceeds = last_amount(&amounts)?;

        let split = FeeSplit::new(proceeds, ledger.fee_bps()).ok_or(RouterError::InvalidOrder)?;
        ledger.accrue(split.fee)?;
        chain.transfer_native(self.router, ctx.caller, split.net).map_err(|_| RouterError::TransferEthFailed)?;

        debug!(caller = %ctx.caller, %token, amount_in = %order.amount, %proceeds, fee = %split.fee, payout = %split.net, "sell executed");
        Ok(SwapReceipt {
            direction: SwapDirection::Sell,
            token_address: token,
            amount_in: order.amount,
            amount_out: split.net,
            fee: split.fee,
        })
    }
}

fn atomically<T>(
    chain: &mut dyn Chain,
    ledger: &mut FeeLedger,
    call: impl FnOnce(&mut dyn Chain, &mut FeeLedger) -> Result<T, RouterError>,
) -> Result<T, RouterError> {
    let checkpoint = chain.checkpoint();
    let fee_state = ledger.state();
    match call(&mut *chain, &mut *ledger) {
        Ok(value) => {
            chain.commit(checkpoint);
            Ok(value)
        }
        Err(err) => {
            chain.revert_to(checkpoint);
            ledger.restore(fee_state);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AmmError;
    use crate::venue::{ConstantProductAmm, InMemoryChain};

    const NOW: u64 = 1_700_000_000;

    fn weth() -> Address {
        Address::repeat_byte(0xEE)
    }

    fn token() -> Address {
        Address::repeat_byte(0xAA)
    }

    fn pair() -> Address {
        Address::repeat_byte(0xBB)
    }

    fn router() -> Address {
        Address::repeat_byte(0x11)
    }

    fn trader() -> Address {
        Address::repeat_byte(0x01)
    }

    fn setup() -> eyre::Result<(ConstantProductAmm, InMemoryChain, FeeLedger)> {
        let amm = ConstantProductAmm::new(Address::repeat_byte(0xCC), weth()).with_pair(token(), pair());
        let mut chain = InMemoryChain::new();
        chain.mint_native(pair(), U256::from(1_000_000u64))?;
        chain.mint_token(token(), pair(), U256::from(2_000_000u64))?;
        chain.mint_token(token(), trader(), U256::from(10_000u64))?;
        chain.approve(token(), trader(), router(), U256::MAX);
        Ok((amm, chain, FeeLedger::new(U256::from(300))?))
    }

    fn order(amount: u64, amount_out_min: U256) -> SwapOrder {
        SwapOrder::new(token(), U256::from(amount), amount_out_min, U256::from(NOW + 60))
    }

    #[test]
    fn test_failed_buy_keeps_no_fee() -> eyre::Result<()> {
        let (amm, mut chain, mut ledger) = setup()?;
        let executor = SwapExecutor::new(&amm, router(), weth());
        // value already escrowed
        chain.mint_native(router(), U256::from(10000))?;

        let result = executor.buy(&mut chain, &mut ledger, &CallContext::new(trader(), NOW), &order(10000, U256::MAX));
        assert!(matches!(result, Err(RouterError::SwapFailed(AmmError::InsufficientOutputAmount { .. }))));
        assert_eq!(ledger.accrued_fees(), U256::ZERO);
        assert_eq!(chain.native_balance(router()), U256::from(10000));
        assert_eq!(chain.journal_len(), 0);

        let receipt = executor.buy(&mut chain, &mut ledger, &CallContext::new(trader(), NOW), &order(10000, U256::ZERO))?;
        assert_eq!(receipt.fee, U256::from(300));
        assert_eq!(ledger.accrued_fees(), U256::from(300));
        assert_eq!(chain.native_balance(router()), U256::from(300));
        Ok(())
    }

    #[test]
    fn test_failed_sell_payout_keeps_no_fee() -> eyre::Result<()> {
        let (amm, mut chain, mut ledger) = setup()?;
        let executor = SwapExecutor::new(&amm, router(), weth());
        chain.set_rejects_native(trader(), true);

        let result = executor.sell(&mut chain, &mut ledger, &CallContext::new(trader(), NOW), &order(2000, U256::ZERO));
        assert_eq!(result, Err(RouterError::TransferEthFailed));
        assert_eq!(ledger.accrued_fees(), U256::ZERO);
        assert_eq!(chain.token_balance(token(), trader()), U256::from(10_000u64));
        assert_eq!(chain.native_balance(router()), U256::ZERO);
        assert_eq!(amm.get_reserves(&chain, token())?, (U256::from(1_000_000u64), U256::from(2_000_000u64)));
        Ok(())
    }

    #[test]
    fn test_escrow_and_refund() -> eyre::Result<()> {
        let (amm, mut chain, _) = setup()?;
        let executor = SwapExecutor::new(&amm, router(), weth());
        chain.mint_native(trader(), U256::from(500))?;
        let ctx = CallContext::new(trader(), NOW).with_value(U256::from(500));

        assert_eq!(executor.escrow_value(&mut chain, &ctx, U256::from(501)), Err(RouterError::InsufficientEth));
        executor.escrow_value(&mut chain, &ctx, U256::from(400))?;
        assert_eq!(chain.native_balance(router()), U256::from(500));

        executor.refund_excess(&mut chain, &ctx, U256::from(400))?;
        assert_eq!(chain.native_balance(trader()), U256::from(100));
        assert_eq!(chain.native_balance(router()), U256::from(400));
        Ok(())
    }
}
