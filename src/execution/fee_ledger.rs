use crate::errors::RouterError;
use crate::utils::constants::MAX_FEE_BPS;
use alloy_primitives::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeState {
    pub fee_bps: U256,
    /// Native fees owed to the owner
    pub accrued_fees: U256,
}

/// Fee rate and accrued-fee accounting.
#[derive(Debug, Clone)]
pub struct FeeLedger {
    state: FeeState,
}

impl FeeLedger {
    pub fn new(fee_bps: U256) -> Result<Self, RouterError> {
        check_fee_rate(fee_bps)?;
        Ok(Self { state: FeeState { fee_bps, accrued_fees: U256::ZERO } })
    }

    pub fn fee_bps(&self) -> U256 {
        self.state.fee_bps
    }

    pub fn accrued_fees(&self) -> U256 {
        self.state.accrued_fees
    }

    pub fn state(&self) -> FeeState {
        self.state
    }

    pub(crate) fn restore(&mut self, state: FeeState) {
        self.state = state;
    }

    /// Overwrites the rate and returns the previous one.
    pub fn set_fee_bps(&mut self, fee_bps: U256) -> Result<U256, RouterError> {
        check_fee_rate(fee_bps)?;
        Ok(std::mem::replace(&mut self.state.fee_bps, fee_bps))
    }

    pub fn accrue(&mut self, fee: U256) -> Result<(), RouterError> {
        self.state.accrued_fees = self.state.accrued_fees.checked_add(fee).ok_or(RouterError::InvalidOrder)?;
        Ok(())
    }

    /// Resets the balance to zero and returns what was owed.
    pub fn take(&mut self) -> Result<U256, RouterError> {
        if self.state.accrued_fees.is_zero() {
            return Err(RouterError::NoFeesToWithdraw);
        }
        Ok(std::mem::take(&mut self.state.accrued_fees))
    }
}

fn check_fee_rate(fee_bps: U256) -> Result<(), RouterError> {
    if fee_bps > MAX_FEE_BPS {
        return Err(RouterError::InvalidFeeRate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_ceiling() -> eyre::Result<()> {
        assert_eq!(FeeLedger::new(MAX_FEE_BPS + U256::from(1)).unwrap_err(), RouterError::InvalidFeeRate);

        let mut ledger = FeeLedger::new(U256::from(30))?;
        assert_eq!(ledger.set_fee_bps(MAX_FEE_BPS)?, U256::from(30));
        assert_eq!(ledger.set_fee_bps(U256::from(10_000)), Err(RouterError::InvalidFeeRate));
        assert_eq!(ledger.fee_bps(), MAX_FEE_BPS);
        Ok(())
    }

    #[test]
    fn test_accrue_and_take() -> eyre::Result<()> {
        let mut ledger = FeeLedger::new(U256::from(30))?;
        assert_eq!(ledger.take(), Err(RouterError::NoFeesToWithdraw));

        for fee in [3u64, 0, 7, 11] {
            ledger.accrue(U256::from(fee))?;
        }
        assert_eq!(ledger.accrued_fees(), U256::from(21));
        assert_eq!(ledger.take()?, U256::from(21));
        assert_eq!(ledger.accrued_fees(), U256::ZERO);
        assert_eq!(ledger.take(), Err(RouterError::NoFeesToWithdraw));
        Ok(())
    }

    #[test]
    fn test_restore() -> eyre::Result<()> {
        let mut ledger = FeeLedger::new(U256::from(30))?;
        let snapshot = ledger.state();
        ledger.accrue(U256::from(5))?;
        ledger.set_fee_bps(U256::from(100))?;
        ledger.restore(snapshot);
        assert_eq!(ledger.state(), FeeState { fee_bps: U256::from(30), accrued_fees: U256::ZERO });
        Ok(())
    }
}
