use crate::utils::constants::FEE_DENOMINATOR;
use alloy_primitives::U256;

/// `amount * fee_bps / FEE_DENOMINATOR`, truncating. `None` on overflow.
pub fn compute_fee(amount: U256, fee_bps: U256) -> Option<U256> {
    Some(amount.checked_mul(fee_bps)? / FEE_DENOMINATOR)
}

/// Split of a native amount into the protocol fee and the remainder.
///
/// `fee + net == gross` always holds; the fee rounds down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub gross: U256,
    pub fee: U256,
    /// Forwarded to the AMM on a buy, paid to the caller on a sell
    pub net: U256,
}

impl FeeSplit {
    pub fn new(gross: U256, fee_bps: U256) -> Option<Self> {
        let fee = compute_fee(gross, fee_bps)?;
        // fee <= gross while fee_bps <= FEE_DENOMINATOR
        let net = gross.checked_sub(fee)?;
        Some(Self { gross, fee, net })
    }
}
