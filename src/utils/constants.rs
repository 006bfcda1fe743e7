use alloy_primitives::{Address, U256, address};

/// Fee rates are expressed in basis points over this denominator.
pub const FEE_DENOMINATOR: U256 = U256::from_limbs([10_000, 0, 0, 0]);

/// Hard ceiling for the fee rate (10%). `setFeeRate` rejects anything above.
pub const MAX_FEE_BPS: U256 = U256::from_limbs([1_000, 0, 0, 0]);

pub const DEFAULT_FEE_BPS: u64 = 30;

/// Key of the native asset in chain balance maps.
pub const NATIVE: Address = Address::ZERO;

#[non_exhaustive]
pub struct SepoliaAddress;

impl SepoliaAddress {
    // Deployed fee router
    pub const RIN_SWAP: Address = address!("11Cc34a2690cc9AA58C5A727711a4F8E12B56d59");

    pub const WETH: Address = address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14");

    // Uniswap V2 compatible
    pub const UNISWAP_V2_ROUTER: Address = address!("eE567Fe1712Faf6149d80dA1E6934E354124CfE3");
}
