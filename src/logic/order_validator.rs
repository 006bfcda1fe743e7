use super::types::SwapOrder;
use crate::errors::RouterError;
use alloy_primitives::U256;

/// Structural and temporal checks run before an order touches any state.
///
/// The slippage floor is not looked at here; the AMM enforces it against the
/// realized output.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    pub fn validate(&self, order: &SwapOrder, timestamp: u64) -> Result<(), RouterError> {
        if order.token_address.is_zero() {
            return Err(RouterError::InvalidOrder);
        }
        if order.amount.is_zero() {
            return Err(RouterError::InvalidOrder);
        }
        let now = U256::from(timestamp);
        if now > order.deadline {
            return Err(RouterError::OrderExpired { deadline: order.deadline, timestamp: now });
        }
        Ok(())
    }

    pub fn validate_all(&self, orders: &[SwapOrder], timestamp: u64) -> Result<(), RouterError> {
        if orders.is_empty() {
            return Err(RouterError::EmptyOrders);
        }
        orders.iter().try_for_each(|order| self.validate(order, timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    fn order(token: Address, amount: u64, deadline: u64) -> SwapOrder {
        SwapOrder::new(token, U256::from(amount), U256::ZERO, U256::from(deadline))
    }

    #[test]
    fn test_valid_order() {
        let validator = OrderValidator;
        assert_eq!(validator.validate(&order(Address::repeat_byte(1), 1, 100), 100), Ok(()));
        assert_eq!(validator.validate(&order(Address::repeat_byte(1), 1, 100), 0), Ok(()));
    }

    #[test]
    fn test_structural_checks() {
        let validator = OrderValidator;
        assert_eq!(validator.validate(&order(Address::ZERO, 1, 100), 1), Err(RouterError::InvalidOrder));
        assert_eq!(validator.validate(&order(Address::repeat_byte(1), 0, 100), 1), Err(RouterError::InvalidOrder));
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let validator = OrderValidator;
        // zero token wins over expiry
        assert_eq!(validator.validate(&order(Address::ZERO, 0, 1), 50), Err(RouterError::InvalidOrder));
        assert_eq!(
            validator.validate(&order(Address::repeat_byte(1), 5, 49), 50),
            Err(RouterError::OrderExpired { deadline: U256::from(49), timestamp: U256::from(50) })
        );
    }

    #[test]
    fn test_batch() {
        let validator = OrderValidator;
        assert_eq!(validator.validate_all(&[], 1), Err(RouterError::EmptyOrders));
        let orders = [order(Address::repeat_byte(1), 1, 10), order(Address::repeat_byte(2), 0, 10)];
        assert_eq!(validator.validate_all(&orders, 1), Err(RouterError::InvalidOrder));
        assert_eq!(validator.validate_all(&orders[..1], 1), Ok(()));
    }
}
