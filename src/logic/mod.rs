/// Logic Layer
///
/// Pure, state-free pieces of the router:
/// - Order types and call context
/// - Fee arithmetic shared by quoting and execution
/// - Order validation
/// - Read-only quoting against the AMM
pub mod fee;
pub mod order_validator;
pub mod quote_engine;
pub mod types;

// Re-export key components from the logic layer
pub use fee::{FeeSplit, compute_fee};
pub use order_validator::OrderValidator;
pub use quote_engine::QuoteEngine;
pub use types::{CallContext, Quote, SwapDirection, SwapOrder, SwapReceipt};
