use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use raffle_common::CampaignStatus;

use crate::error::ContractError;

pub const CONFIG: Item<CampaignConfig> = Item::new("config");
pub const CAMPAIGN: Item<CampaignState> = Item::new("campaign");
/// Ticket sequence number -> buyer
pub const PURCHASES: Map<u64, Addr> = Map::new("purchases");

/// Fixed at instantiation.
#[cw_serde]
pub struct CampaignConfig {
    pub owner: Addr,
    pub ticket_registry: Addr,
    pub name: String,
    pub description: String,
    /// Last block height at which tickets can be bought
    pub deadline: u64,
    pub ticket_price: Uint128,
    /// Native denom tickets are paid in
    pub denom: String,
    pub total_tickets: u64,
    pub total_winners: u64,
}

#[cw_serde]
pub struct CampaignState {
    pub status: CampaignStatus,
    pub tickets_sold: u64,
    /// Funds held for the owner; `ticket_price * tickets_sold` until withdrawn
    pub balance: Uint128,
    /// Winning ticket sequence numbers, empty until winners are selected
    pub winners: Vec<u64>,
    pub total_withdrawn: Uint128,
    pub closed_at_height: Option<u64>,
}

impl CampaignState {
    pub fn new() -> Self {
        CampaignState {
            status: CampaignStatus::Active,
            tickets_sold: 0,
            balance: Uint128::zero(),
            winners: vec![],
            total_withdrawn: Uint128::zero(),
            closed_at_height: None,
        }
    }

    /// Close an active campaign once `height` is past `deadline`.
    /// Returns whether the status changed.
    pub fn close_if_expired(&mut self, deadline: u64, height: u64) -> bool {
        if self.status != CampaignStatus::Active || height <= deadline {
            return false;
        }
        self.status = CampaignStatus::Closed;
        self.closed_at_height = Some(height);
        true
    }

    pub fn advance(&mut self, next: CampaignStatus) -> Result<(), ContractError> {
        if !self.status.can_advance_to(next) {
            return Err(ContractError::InvalidState {
                reason: format!("cannot move campaign from {} to {}", self.status, next),
            });
        }
        self.status = next;
        Ok(())
    }
}

impl Default for CampaignState {
    fn default() -> Self {
        Self::new()
    }
}
