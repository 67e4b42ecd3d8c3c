pub mod types;

pub use types::{CampaignStatus, Ticket};
