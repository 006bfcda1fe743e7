use alloy_sol_types::sol;

// Event and error surface of the deployed router. Logs and revert data produced
// by this crate are encoded against these definitions.
sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IRinSwap {
        event SwapExecuted(address indexed user, address indexed tokenAddress, bool isBuy, uint256 amountIn, uint256 amountOut);
        event FeeRateChanged(uint256 oldRate, uint256 newRate);
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);

        error InvalidOrder();
        error OrderExpired(uint256 deadline, uint256 timestamp);
        error InsufficientETH();
        error SwapFailed();
        error InvalidFeeRate();
        error NoFeesToWithdraw();
        error TransferETHFailed();
        error EmptyOrders();
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);
        error SafeERC20FailedOperation(address token);
    }
}
