use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// The lifecycle status of a raffle campaign.
///
/// Transitions only move forward: `Active -> Closed -> WinnersSelected`.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum CampaignStatus {
    Active,
    Closed,
    WinnersSelected,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Closed => "closed",
            CampaignStatus::WinnersSelected => "winners_selected",
        }
    }

    /// Position in the lifecycle, used to reject backwards transitions.
    fn rank(&self) -> u8 {
        match self {
            CampaignStatus::Active => 0,
            CampaignStatus::Closed => 1,
            CampaignStatus::WinnersSelected => 2,
        }
    }

    /// Whether moving from `self` to `next` is a single forward step.
    pub fn can_advance_to(&self, next: CampaignStatus) -> bool {
        next.rank() == self.rank() + 1
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raffle entry minted by the ticket registry on behalf of a campaign.
#[cw_serde]
pub struct Ticket {
    /// Registry-wide unique id, starting at 1
    pub id: u64,
    /// The campaign contract that minted this ticket
    pub campaign: Addr,
    pub holder: Addr,
    pub price: Uint128,
    /// Per-campaign issuance number, starting at 1
    pub sequence: u64,
    pub minted_at_height: u64,
}
