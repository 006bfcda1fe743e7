use crate::abi::IRinSwap;
use crate::logic::SwapReceipt;
use alloy_primitives::{Address, LogData, U256};
use alloy_sol_types::SolEvent;

/// Records emitted by the router, mirroring the deployed contract's events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    SwapExecuted { user: Address, token_address: Address, is_buy: bool, amount_in: U256, amount_out: U256 },
    FeeRateChanged { old_rate: U256, new_rate: U256 },
    /// `Address::ZERO` stands for "no owner" on either side
    OwnershipTransferred { previous_owner: Address, new_owner: Address },
}

impl RouterEvent {
    pub fn swap_executed(user: Address, receipt: &SwapReceipt) -> Self {
        RouterEvent::SwapExecuted {
            user,
            token_address: receipt.token_address,
            is_buy: receipt.direction.is_buy(),
            amount_in: receipt.amount_in,
            amount_out: receipt.amount_out,
        }
    }

    /// Topics and data as they would appear in the transaction receipt.
    pub fn encode_log_data(&self) -> LogData {
        match self {
            RouterEvent::SwapExecuted { user, token_address, is_buy, amount_in, amount_out } => IRinSwap::SwapExecuted {
                user: *user,
                tokenAddress: *token_address,
                isBuy: *is_buy,
                amountIn: *amount_in,
                amountOut: *amount_out,
            }
            .encode_log_data(),
            RouterEvent::FeeRateChanged { old_rate, new_rate } => {
                IRinSwap::FeeRateChanged { oldRate: *old_rate, newRate: *new_rate }.encode_log_data()
            }
            RouterEvent::OwnershipTransferred { previous_owner, new_owner } => {
                IRinSwap::OwnershipTransferred { previousOwner: *previous_owner, newOwner: *new_owner }.encode_log_data()
            }
        }
    }
}
