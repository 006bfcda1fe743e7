// Three-Layer Architecture
pub mod logic; // Logic Layer: order types, fee math, validation, quoting
pub mod execution; // Execution Layer: swap execution, fee ledger, access control, events
pub mod venue; // Venue Layer: chain state and AMM collaborators

pub mod abi;
pub mod config;
pub mod errors;
pub mod router;

// Common utilities and types
pub mod utils;

// Re-export key components from each layer
pub use config::RouterConfigSection;
pub use errors::{AmmError, RouterError, TransferError};
pub use execution::{AccessController, FeeLedger, FeeState, RouterEvent, SwapExecutor};
pub use logic::{CallContext, FeeSplit, OrderValidator, Quote, QuoteEngine, SwapDirection, SwapOrder, SwapReceipt, compute_fee};
pub use router::Router;
pub use utils::{FEE_DENOMINATOR, MAX_FEE_BPS, NATIVE, SepoliaAddress};
pub use venue::{AmmRouter, AmmSwap, Chain, Checkpoint, ConstantProductAmm, InMemoryChain};
