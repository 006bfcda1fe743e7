use crate::utils::config_loader::ConfigSection;
use crate::utils::constants::{DEFAULT_FEE_BPS, SepoliaAddress};
use alloy_primitives::{Address, U256};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct RouterConfigRoot {
    pub router: RouterConfigSection,
}

/// Deployment parameters of a router instance.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfigSection {
    /// Account the router settles from
    #[serde(default = "default_address")]
    pub address: Address,
    pub owner: Address,
    #[serde(default = "default_amm_router")]
    pub amm_router: Address,
    #[serde(default = "default_wrapped_native")]
    pub wrapped_native: Address,
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u64,
}

fn default_address() -> Address {
    SepoliaAddress::RIN_SWAP
}

fn default_amm_router() -> Address {
    SepoliaAddress::UNISWAP_V2_ROUTER
}

fn default_wrapped_native() -> Address {
    SepoliaAddress::WETH
}

fn default_fee_bps() -> u64 {
    DEFAULT_FEE_BPS
}

impl RouterConfigSection {
    pub fn new(owner: Address) -> Self {
        Self {
            address: default_address(),
            owner,
            amm_router: default_amm_router(),
            wrapped_native: default_wrapped_native(),
            fee_bps: default_fee_bps(),
        }
    }

    pub fn with_address(self, address: Address) -> Self {
        Self { address, ..self }
    }

    pub fn with_amm_router(self, amm_router: Address) -> Self {
        Self { amm_router, ..self }
    }

    pub fn with_wrapped_native(self, wrapped_native: Address) -> Self {
        Self { wrapped_native, ..self }
    }

    pub fn with_fee_bps(self, fee_bps: u64) -> Self {
        Self { fee_bps, ..self }
    }

    pub fn fee_bps(&self) -> U256 {
        U256::from(self.fee_bps)
    }
}

impl ConfigSection for RouterConfigSection {
    type Root = RouterConfigRoot;

    fn from_root(root: RouterConfigRoot) -> Self {
        root.router
    }
}
