use super::events::RouterEvent;
use crate::errors::RouterError;
use alloy_primitives::Address;

/// Single-owner gate for administrative operations.
///
/// `None` means ownership was renounced; nothing can pass the gate after that.
#[derive(Debug, Clone)]
pub struct AccessController {
    owner: Option<Address>,
}

impl AccessController {
    pub fn new(owner: Address) -> Result<(Self, RouterEvent), RouterError> {
        if owner.is_zero() {
            return Err(RouterError::InvalidOwner { owner });
        }
        let event = RouterEvent::OwnershipTransferred { previous_owner: Address::ZERO, new_owner: owner };
        Ok((Self { owner: Some(owner) }, event))
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    pub fn only_owner(&self, caller: Address) -> Result<Address, RouterError> {
        match self.owner {
            Some(owner) if owner == caller => Ok(owner),
            _ => Err(RouterError::Unauthorized { account: caller }),
        }
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<RouterEvent, RouterError> {
        let previous_owner = self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(RouterError::InvalidOwner { owner: new_owner });
        }
        self.owner = Some(new_owner);
        Ok(RouterEvent::OwnershipTransferred { previous_owner, new_owner })
    }

    pub fn renounce_ownership(&mut self, caller: Address) -> Result<RouterEvent, RouterError> {
        let previous_owner = self.only_owner(caller)?;
        self.owner = None;
        Ok(RouterEvent::OwnershipTransferred { previous_owner, new_owner: Address::ZERO })
    }
}
