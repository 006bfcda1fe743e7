use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A caller-supplied swap order, consumed once by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOrder {
    /// Token being bought or sold
    pub token_address: Address,
    /// Native amount for a buy, token amount for a sell
    pub amount: U256,
    /// Slippage floor, enforced by the AMM
    pub amount_out_min: U256,
    /// Absolute expiry (unix seconds); valid while `timestamp <= deadline`
    pub deadline: U256,
}

impl SwapOrder {
    pub fn new(token_address: Address, amount: U256, amount_out_min: U256, deadline: U256) -> Self {
        Self { token_address, amount, amount_out_min, deadline }
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapDirection {
    Buy,
    Sell,
}

impl SwapDirection {
    pub fn is_buy(&self) -> bool {
        matches!(self, SwapDirection::Buy)
    }
}

/// Caller, attached native value and block time of one external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: U256,
    pub timestamp: u64,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, value: U256::ZERO, timestamp }
    }

    pub fn with_value(self, value: U256) -> Self {
        Self { value, ..self }
    }
}

/// Result of a read-only estimate. Both amounts are what an execution against
/// unchanged reserves would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quote {
    /// Tokens for a buy, native payout after fee for a sell
    pub amount_out: U256,
    /// Always native
    pub fee: U256,
}

/// Outcome of one executed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    pub direction: SwapDirection,
    pub token_address: Address,
    pub amount_in: U256,
    pub amount_out: U256,
    pub fee: U256,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_direction_display() -> eyre::Result<()> {
        assert_eq!(format!("{}", SwapDirection::Buy), "BUY");
        assert_eq!(SwapDirection::from_str("SELL")?, SwapDirection::Sell);
        assert_eq!(SwapDirection::iter().filter(SwapDirection::is_buy).count(), 1);
        Ok(())
    }

    #[test]
    fn test_serialize_order() -> eyre::Result<()> {
        let order = SwapOrder::new(Address::repeat_byte(1), U256::from(10000), U256::from(5), U256::from(1_700_000_000u64));
        let serialized = serde_json::to_string(&order)?;
        assert_eq!(
            serialized,
            "{\"tokenAddress\":\"0x0101010101010101010101010101010101010101\",\"amount\":\"0x2710\",\"amountOutMin\":\"0x5\",\"deadline\":\"0x6553f100\"}"
        );
        let decoded: SwapOrder = serde_json::from_str(&serialized)?;
        assert_eq!(decoded, order);
        Ok(())
    }
}
