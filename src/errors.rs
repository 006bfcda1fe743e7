use crate::abi::IRinSwap;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolError;

/// Failure moving native or token balances.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("insufficient balance: {account} holds {available}, needs {required}")]
    InsufficientBalance { account: Address, available: U256, required: U256 },
    #[error("insufficient allowance: {spender} may spend {available} of {owner}'s tokens, needs {required}")]
    InsufficientAllowance { owner: Address, spender: Address, available: U256, required: U256 },
    #[error("{0} rejects native transfers")]
    Rejected(Address),
    #[error("balance overflow for {0}")]
    Overflow(Address),
}

/// Failure reported by the external AMM router.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    #[error("EXPIRED")]
    Expired,
    #[error("INVALID_PATH")]
    InvalidPath,
    #[error("no pair for token {0}")]
    UnknownPair(Address),
    #[error("INSUFFICIENT_INPUT_AMOUNT")]
    InsufficientInputAmount,
    #[error("INSUFFICIENT_LIQUIDITY")]
    InsufficientLiquidity,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("INSUFFICIENT_OUTPUT_AMOUNT: got {amount_out}, wanted at least {amount_out_min}")]
    InsufficientOutputAmount { amount_out: U256, amount_out_min: U256 },
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("invalid order")]
    InvalidOrder,
    #[error("order expired: deadline {deadline}, now {timestamp}")]
    OrderExpired { deadline: U256, timestamp: U256 },
    #[error("insufficient native value attached")]
    InsufficientEth,
    #[error("swap failed: {0}")]
    SwapFailed(#[from] AmmError),
    #[error("unauthorized account {account}")]
    Unauthorized { account: Address },
    #[error("invalid owner {owner}")]
    InvalidOwner { owner: Address },
    #[error("invalid fee rate")]
    InvalidFeeRate,
    #[error("no fees to withdraw")]
    NoFeesToWithdraw,
    #[error("native transfer failed")]
    TransferEthFailed,
    #[error("token transfer failed for {token}")]
    TokenTransferFailed { token: Address },
    #[error("empty order batch")]
    EmptyOrders,
    /// Native value attached to a call that does not accept it
    #[error("call is not payable, {value} attached")]
    NonPayable { value: U256 },
}

impl RouterError {
    /// ABI-encoded revert data as the deployed router reports it.
    pub fn revert_data(&self) -> Bytes {
        let encoded = match self {
            RouterError::InvalidOrder => IRinSwap::InvalidOrder {}.abi_encode(),
            RouterError::OrderExpired { deadline, timestamp } => {
                IRinSwap::OrderExpired { deadline: *deadline, timestamp: *timestamp }.abi_encode()
            }
            RouterError::InsufficientEth => IRinSwap::InsufficientETH {}.abi_encode(),
            RouterError::SwapFailed(_) => IRinSwap::SwapFailed {}.abi_encode(),
            RouterError::Unauthorized { account } => IRinSwap::OwnableUnauthorizedAccount { account: *account }.abi_encode(),
            RouterError::InvalidOwner { owner } => IRinSwap::OwnableInvalidOwner { owner: *owner }.abi_encode(),
            RouterError::InvalidFeeRate => IRinSwap::InvalidFeeRate {}.abi_encode(),
            RouterError::NoFeesToWithdraw => IRinSwap::NoFeesToWithdraw {}.abi_encode(),
            RouterError::TransferEthFailed => IRinSwap::TransferETHFailed {}.abi_encode(),
            RouterError::TokenTransferFailed { token } => IRinSwap::SafeERC20FailedOperation { token: *token }.abi_encode(),
            RouterError::EmptyOrders => IRinSwap::EmptyOrders {}.abi_encode(),
            // rejected before any code runs, so there is no error data
            RouterError::NonPayable { .. } => Vec::new(),
        };
        encoded.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_data_selectors() {
        assert_eq!(RouterError::NoFeesToWithdraw.revert_data().as_ref(), IRinSwap::NoFeesToWithdraw::SELECTOR.as_slice());
        assert_eq!(RouterError::EmptyOrders.revert_data().len(), 4);

        let account = Address::repeat_byte(7);
        let data = RouterError::Unauthorized { account }.revert_data();
        assert_eq!(&data[..4], IRinSwap::OwnableUnauthorizedAccount::SELECTOR.as_slice());
        // selector + one abi word
        assert_eq!(data.len(), 36);
        assert_eq!(&data[16..36], account.as_slice());
    }

    #[test]
    fn test_swap_failed_hides_amm_detail() {
        let err = RouterError::from(AmmError::InsufficientOutputAmount { amount_out: U256::from(1), amount_out_min: U256::from(2) });
        assert_eq!(err.revert_data().as_ref(), IRinSwap::SwapFailed::SELECTOR.as_slice());
        assert!(err.to_string().contains("INSUFFICIENT_OUTPUT_AMOUNT"));
    }

    #[test]
    fn test_non_payable_reverts_without_data() {
        assert!(RouterError::NonPayable { value: U256::from(1) }.revert_data().is_empty());
    }
}
