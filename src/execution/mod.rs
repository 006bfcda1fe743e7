/// Execution Layer
///
/// This layer is responsible for:
/// - Executing buy/sell orders against the AMM with the fee split
/// - Fee rate and accrued-fee accounting
/// - Owner-gated administration
/// - Event records in the deployed contract's log format
pub mod access_controller;
pub mod events;
pub mod fee_ledger;
pub mod swap_executor;


// Re-export key components from the execution layer
pub use access_controller::AccessController;
pub use events::RouterEvent;
pub use fee_ledger::{FeeLedger, FeeState};
pub use swap_executor::SwapExecutor;
