use crate::config::RouterConfigSection;
use crate::errors::RouterError;
use crate::execution::{AccessController, FeeLedger, FeeState, RouterEvent, SwapExecutor};
use crate::logic::{CallContext, OrderValidator, Quote, QuoteEngine, SwapOrder, SwapReceipt};
use crate::utils::config_loader::ConfigSection;
use crate::utils::constants::FEE_DENOMINATOR;
use crate::venue::{AmmRouter, Chain};
use alloy_primitives::{Address, U256};
use tracing::{info, warn};

struct RouterSnapshot {
    fee_state: FeeState,
    events_len: usize,
}

/// The fee-skimming swap router.
///
/// Sole entry point for callers. Every state-changing call runs as one
/// transaction: on error the chain is reverted to a checkpoint taken at entry,
/// the fee ledger is restored and events emitted during the call are dropped.
pub struct Router<A: AmmRouter> {
    address: Address,
    amm: A,
    wrapped_native: Address,
    validator: OrderValidator,
    ledger: FeeLedger,
    access: AccessController,
    events: Vec<RouterEvent>,
}

impl<A: AmmRouter> Router<A> {
    pub fn new(amm: A, address: Address, owner: Address, wrapped_native: Address, fee_bps: U256) -> Result<Self, RouterError> {
        let ledger = FeeLedger::new(fee_bps)?;
        let (access, ownership_event) = AccessController::new(owner)?;

        info!(%address, %owner, amm = %amm.address(), %wrapped_native, %fee_bps, "router deployed");
        Ok(Self {
            address,
            amm,
            wrapped_native,
            validator: OrderValidator,
            ledger,
            access,
            events: vec![ownership_event],
        })
    }

    pub fn from_config(amm: A, config: &RouterConfigSection) -> eyre::Result<Self> {
        eyre::ensure!(
            amm.address() == config.amm_router,
            "AMM router {} does not match configured {}",
            amm.address(),
            config.amm_router
        );
        Ok(Self::new(amm, config.address, config.owner, config.wrapped_native, config.fee_bps())?)
    }

    pub fn from_config_file(amm: A, file_name: String) -> eyre::Result<Self> {
        let config = RouterConfigSection::load_section_from_file_sync(file_name)?;
        Self::from_config(amm, &config)
    }

    /// Same as [`Router::from_config_file`], reading the file on the tokio runtime.
    pub async fn load_from_config_file(amm: A, file_name: String) -> eyre::Result<Self> {
        let config = RouterConfigSection::load_section_from_file(file_name).await?;
        Self::from_config(amm, &config)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Option<Address> {
        self.access.owner()
    }

    pub fn fee_bps(&self) -> U256 {
        self.ledger.fee_bps()
    }

    pub fn fee_denominator(&self) -> U256 {
        FEE_DENOMINATOR
    }

    pub fn accrued_fees(&self) -> U256 {
        self.ledger.accrued_fees()
    }

    pub fn amm(&self) -> &A {
        &self.amm
    }

    pub fn amm_router(&self) -> Address {
        self.amm.address()
    }

    pub fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    pub fn events(&self) -> &[RouterEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RouterEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn estimate_buy(&self, chain: &dyn Chain, token: Address, native_in: U256) -> Result<Quote, RouterError> {
        self.quote_engine().estimate_buy(chain, token, native_in)
    }

    pub fn estimate_sell(&self, chain: &dyn Chain, token: Address, token_in: U256) -> Result<Quote, RouterError> {
        self.quote_engine().estimate_sell(chain, token, token_in)
    }

    /// Accepts a plain native deposit.
    pub fn receive(&mut self, chain: &mut dyn Chain, ctx: &CallContext) -> Result<(), RouterError> {
        self.transact(chain, "receive", |router, chain| {
            chain.transfer_native(ctx.caller, router.address, ctx.value).map_err(|_| RouterError::InsufficientEth)
        })
    }

    /// Payable: `ctx.value` must cover `order.amount`, any excess is refunded.
    pub fn execute_buy_order(&mut self, chain: &mut dyn Chain, ctx: &CallContext, order: &SwapOrder) -> Result<SwapReceipt, RouterError> {
        let mut receipts = self.buy_orders(chain, ctx, std::slice::from_ref(order), "executeBuyOrder")?;
        receipts.pop().ok_or(RouterError::EmptyOrders)
    }

    /// Payable: `ctx.value` must cover the sum of all order amounts.
    pub fn execute_buy_orders(&mut self, chain: &mut dyn Chain, ctx: &CallContext, orders: &[SwapOrder]) -> Result<Vec<SwapReceipt>, RouterError> {
        self.buy_orders(chain, ctx, orders, "executeBuyOrders")
    }

    /// The caller must have approved the router for `order.amount` tokens.
    /// Not payable.
    pub fn execute_sell_order(&mut self, chain: &mut dyn Chain, ctx: &CallContext, order: &SwapOrder) -> Result<SwapReceipt, RouterError> {
        let mut receipts = self.sell_orders(chain, ctx, std::slice::from_ref(order), "executeSellOrder")?;
        receipts.pop().ok_or(RouterError::EmptyOrders)
    }

    pub fn execute_sell_orders(&mut self, chain: &mut dyn Chain, ctx: &CallContext, orders: &[SwapOrder]) -> Result<Vec<SwapReceipt>, RouterError> {
        self.sell_orders(chain, ctx, orders, "executeSellOrders")
    }

    pub fn set_fee_rate(&mut self, ctx: &CallContext, fee_bps: U256) -> Result<(), RouterError> {
        non_payable(ctx)?;
        self.access.only_owner(ctx.caller)?;
        let old_rate = self.ledger.set_fee_bps(fee_bps)?;

        info!(%old_rate, new_rate = %fee_bps, "fee rate changed");
        self.events.push(RouterEvent::FeeRateChanged { old_rate, new_rate: fee_bps });
        Ok(())
    }

    /// Sends every accrued fee to the owner and returns the amount.
    pub fn withdraw_fees(&mut self, chain: &mut dyn Chain, ctx: &CallContext) -> Result<U256, RouterError> {
        self.transact(chain, "withdrawFees", |router, chain| {
            non_payable(ctx)?;
            let owner = router.access.only_owner(ctx.caller)?;
            // zeroed before the transfer goes out
            let amount = router.ledger.take()?;
            chain.transfer_native(router.address, owner, amount).map_err(|_| RouterError::TransferEthFailed)?;

            info!(%owner, %amount, "fees withdrawn");
            Ok(amount)
        })
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> Result<(), RouterError> {
        non_payable(ctx)?;
        let event = self.access.transfer_ownership(ctx.caller, new_owner)?;
        info!(previous_owner = %ctx.caller, %new_owner, "ownership transferred");
        self.events.push(event);
        Ok(())
    }

    pub fn renounce_ownership(&mut self, ctx: &CallContext) -> Result<(), RouterError> {
        non_payable(ctx)?;
        let event = self.access.renounce_ownership(ctx.caller)?;
        warn!(previous_owner = %ctx.caller, "ownership renounced");
        self.events.push(event);
        Ok(())
    }

    fn quote_engine(&self) -> QuoteEngine<'_, A> {
        QuoteEngine::new(&self.amm, self.wrapped_native, self.ledger.fee_bps())
    }

    fn buy_orders(
        &mut self,
        chain: &mut dyn Chain,
        ctx: &CallContext,
        orders: &[SwapOrder],
        operation: &'static str,
    ) -> Result<Vec<SwapReceipt>, RouterError> {
        self.transact(chain, operation, |router, chain| {
            router.validator.validate_all(orders, ctx.timestamp)?;
            let total = orders
                .iter()
                .try_fold(U256::ZERO, |total, order| total.checked_add(order.amount))
                .ok_or(RouterError::InvalidOrder)?;

            let executor = SwapExecutor::new(&router.amm, router.address, router.wrapped_native);
            executor.escrow_value(chain, ctx, total)?;

            let mut receipts = Vec::with_capacity(orders.len());
            for order in orders {
                let receipt = executor.buy(chain, &mut router.ledger, ctx, order)?;
                router.events.push(RouterEvent::swap_executed(ctx.caller, &receipt));
                receipts.push(receipt);
            }
            executor.refund_excess(chain, ctx, total)?;
            Ok(receipts)
        })
    }

    fn sell_orders(
        &mut self,
        chain: &mut dyn Chain,
        ctx: &CallContext,
        orders: &[SwapOrder],
        operation: &'static str,
    ) -> Result<Vec<SwapReceipt>, RouterError> {
        self.transact(chain, operation, |router, chain| {
            non_payable(ctx)?;
            router.validator.validate_all(orders, ctx.timestamp)?;

            let executor = SwapExecutor::new(&router.amm, router.address, router.wrapped_native);
            let mut receipts = Vec::with_capacity(orders.len());
            for order in orders {
                let receipt = executor.sell(chain, &mut router.ledger, ctx, order)?;
                router.events.push(RouterEvent::swap_executed(ctx.caller, &receipt));
                receipts.push(receipt);
            }
            Ok(receipts)
        })
    }

    fn transact<T>(
        &mut self,
        chain: &mut dyn Chain,
        operation: &'static str,
        call: impl FnOnce(&mut Self, &mut dyn Chain) -> Result<T, RouterError>,
    ) -> Result<T, RouterError> {
        let checkpoint = chain.checkpoint();
        let snapshot = RouterSnapshot { fee_state: self.ledger.state(), events_len: self.events.len() };

        match call(self, &mut *chain) {
            Ok(value) => {
                chain.commit(checkpoint);
                Ok(value)
            }
            Err(err) => {
                chain.revert_to(checkpoint);
                self.ledger.restore(snapshot.fee_state);
                self.events.truncate(snapshot.events_len);
                warn!(operation, %err, "call reverted");
                Err(err)
            }
        }
    }
}

fn non_payable(ctx: &CallContext) -> Result<(), RouterError> {
    if !ctx.value.is_zero() {
        return Err(RouterError::NonPayable { value: ctx.value });
    }
    Ok(())
}
