//! Integration tests for the raffle contracts.
//!
//! Both contracts are driven through their `instantiate` / `execute` / `query`
//! entry points with `cosmwasm_std::testing` mocks. A small `Chain` harness
//! plays the part of the host: it relays the campaign's `WasmMsg::Execute`
//! mint messages to the ticket registry and applies `BankMsg::Send` transfers
//! to an in-memory bank so fund movements can be checked end to end.
//!
//! Run:
//! ```bash
//! cargo test -p raffle-integration-tests
//! ```

use std::collections::HashMap;

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, Addr, BankMsg, CosmosMsg, Env, MemoryStorage, OwnedDeps, Response,
    StdError, Uint128, WasmMsg,
};
use raffle_common::{CampaignStatus, Ticket};

// ─── Constants ───

const DENOM: &str = "inj";
/// 0.01 INJ
const PRICE: u128 = 10_000_000_000_000_000;
/// 1 INJ
const STARTING_BALANCE: u128 = 1_000_000_000_000_000_000;
const DEADLINE_BLOCKS: u64 = 10;

type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Harness ───

struct Chain {
    api: MockApi,
    registry: MockDeps,
    campaign: MockDeps,
    registry_addr: Addr,
    campaign_addr: Addr,
    owner: Addr,
    height: u64,
    bank: HashMap<Addr, u128>,
}

impl Chain {
    /// Instantiate a registry and a campaign selling `total_tickets` tickets.
    fn new(total_tickets: u64, total_winners: u64) -> Self {
        let api = MockApi::default();
        let mut chain = Chain {
            registry: mock_dependencies(),
            campaign: mock_dependencies(),
            registry_addr: api.addr_make("raffle_ticket"),
            campaign_addr: api.addr_make("raffle_campaign"),
            owner: api.addr_make("owner"),
            height: mock_env().block.height,
            bank: HashMap::new(),
            api,
        };

        let info = message_info(&chain.owner, &[]);
        let env = chain.env(&chain.registry_addr);
        raffle_ticket::contract::instantiate(
            chain.registry.as_mut(),
            env,
            info,
            raffle_ticket::msg::InstantiateMsg {},
        )
        .unwrap();

        let msg = raffle_campaign::msg::InstantiateMsg {
            name: "Raffle Campaign".to_string(),
            description: "Raffle Campaign Description".to_string(),
            deadline: chain.height + DEADLINE_BLOCKS,
            ticket_price: Uint128::new(PRICE),
            denom: DENOM.to_string(),
            total_tickets,
            total_winners,
            ticket_registry: chain.registry_addr.to_string(),
            owner: None,
        };
        let info = message_info(&chain.owner, &[]);
        let env = chain.env(&chain.campaign_addr);
        raffle_campaign::contract::instantiate(chain.campaign.as_mut(), env, info, msg).unwrap();

        chain
    }

    fn env(&self, contract: &Addr) -> Env {
        let mut env = mock_env();
        env.block.height = self.height;
        env.contract.address = contract.clone();
        env
    }

    fn account(&mut self, name: &str) -> Addr {
        let addr = self.api.addr_make(name);
        self.bank.insert(addr.clone(), STARTING_BALANCE);
        addr
    }

    fn balance_of(&self, addr: &Addr) -> u128 {
        self.bank.get(addr).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &Addr, to: &Addr, amount: u128) {
        let from_balance = self.balance_of(from);
        assert!(from_balance >= amount, "insufficient bank balance for {}", from);
        self.bank.insert(from.clone(), from_balance - amount);
        *self.bank.entry(to.clone()).or_insert(0) += amount;
    }

    /// Apply the messages a campaign response dispatches, returning any
    /// tickets the registry minted along the way.
    fn relay(&mut self, res: Response) -> Vec<Ticket> {
        let mut minted = vec![];
        for sub in res.messages {
            match sub.msg {
                CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr,
                    msg,
                    funds,
                }) => {
                    assert_eq!(contract_addr, self.registry_addr.to_string());
                    let msg: raffle_ticket::msg::ExecuteMsg = from_json(&msg).unwrap();
                    let info = message_info(&self.campaign_addr, &funds);
                    let env = self.env(&self.registry_addr);
                    let res =
                        raffle_ticket::contract::execute(self.registry.as_mut(), env, info, msg)
                            .unwrap();
                    minted.push(from_json(res.data.unwrap()).unwrap());
                }
                CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
                    let to = Addr::unchecked(to_address);
                    for coin in amount {
                        assert_eq!(coin.denom, DENOM);
                        let campaign = self.campaign_addr.clone();
                        self.transfer(&campaign, &to, coin.amount.u128());
                    }
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
        minted
    }

    fn buy(&mut self, buyer: &Addr) -> Result<Ticket, raffle_campaign::ContractError> {
        let campaign = self.campaign_addr.clone();
        // Funds move with the message and come back if execution fails
        self.transfer(buyer, &campaign, PRICE);
        let info = message_info(buyer, &coins(PRICE, DENOM));
        let env = self.env(&self.campaign_addr);
        match raffle_campaign::contract::execute(
            self.campaign.as_mut(),
            env,
            info,
            raffle_campaign::msg::ExecuteMsg::BuyTicket {},
        ) {
            Ok(res) => {
                let mut minted = self.relay(res);
                assert_eq!(minted.len(), 1);
                Ok(minted.remove(0))
            }
            Err(err) => {
                self.transfer(&campaign, buyer, PRICE);
                Err(err)
            }
        }
    }

    fn execute_campaign(
        &mut self,
        sender: &Addr,
        msg: raffle_campaign::msg::ExecuteMsg,
    ) -> Result<Response, raffle_campaign::ContractError> {
        let info = message_info(sender, &[]);
        let env = self.env(&self.campaign_addr);
        let res = raffle_campaign::contract::execute(self.campaign.as_mut(), env, info, msg)?;
        self.relay(res.clone());
        Ok(res)
    }

    fn query_campaign<T: serde::de::DeserializeOwned>(
        &self,
        msg: raffle_campaign::msg::QueryMsg,
    ) -> T {
        let env = self.env(&self.campaign_addr);
        from_json(raffle_campaign::contract::query(self.campaign.as_ref(), env, msg).unwrap())
            .unwrap()
    }

    fn query_registry<T: serde::de::DeserializeOwned>(
        &self,
        msg: raffle_ticket::msg::QueryMsg,
    ) -> Result<T, StdError> {
        let env = self.env(&self.registry_addr);
        raffle_ticket::contract::query(self.registry.as_ref(), env, msg)
            .and_then(|res| from_json(res))
    }

    fn status(&self) -> CampaignStatus {
        self.query_campaign(raffle_campaign::msg::QueryMsg::CampaignState {})
    }

    fn contract_balance(&self) -> Uint128 {
        self.query_campaign(raffle_campaign::msg::QueryMsg::ContractBalance {})
    }

    fn tickets_bought(&self) -> u64 {
        self.query_campaign(raffle_campaign::msg::QueryMsg::TicketsBought {})
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_raffle_lifecycle() {
    let mut chain = Chain::new(2, 1);
    let person1 = chain.account("person1");
    let person2 = chain.account("person2");
    let person3 = chain.account("person3");
    let beneficiary = chain.account("beneficiary");

    // 1. Fresh campaign
    assert_eq!(chain.status(), CampaignStatus::Active);
    assert_eq!(chain.tickets_bought(), 0);

    // 2. Two purchases sell the campaign out
    let t1 = chain.buy(&person1).unwrap();
    let t2 = chain.buy(&person2).unwrap();
    assert_eq!((t1.sequence, t2.sequence), (1, 2));
    assert_eq!(t1.campaign, chain.campaign_addr);
    assert_eq!(t2.holder, person2);
    assert_eq!(chain.status(), CampaignStatus::Closed);

    // 3. A third purchase is rejected and the buyer keeps their funds
    let err = chain.buy(&person3).unwrap_err();
    assert!(
        matches!(err, raffle_campaign::ContractError::InvalidState { .. }),
        "Expected invalid state, got: {:?}",
        err
    );
    assert_eq!(chain.balance_of(&person3), STARTING_BALANCE);
    assert_eq!(chain.tickets_bought(), 2);

    // 4. Held balance equals price * tickets bought
    assert_eq!(chain.contract_balance(), Uint128::new(2 * PRICE));
    assert_eq!(chain.balance_of(&chain.campaign_addr), 2 * PRICE);

    // 5. Only the owner selects winners
    let err = chain
        .execute_campaign(
            &person1,
            raffle_campaign::msg::ExecuteMsg::SetWinners { winners: vec![2] },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        raffle_campaign::ContractError::Unauthorized { .. }
    ));
    assert_eq!(chain.status(), CampaignStatus::Closed);

    let owner = chain.owner.clone();
    chain
        .execute_campaign(
            &owner,
            raffle_campaign::msg::ExecuteMsg::SetWinners { winners: vec![2] },
        )
        .unwrap();
    assert_eq!(chain.status(), CampaignStatus::WinnersSelected);

    let winners: raffle_campaign::msg::WinnersResponse =
        chain.query_campaign(raffle_campaign::msg::QueryMsg::Winners {});
    assert_eq!(winners.winners[0].holder, person2);

    // 6. Only the owner withdraws
    let err = chain
        .execute_campaign(
            &person1,
            raffle_campaign::msg::ExecuteMsg::Withdraw {
                beneficiary: beneficiary.to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        raffle_campaign::ContractError::Unauthorized { .. }
    ));

    let before = chain.balance_of(&beneficiary);
    chain
        .execute_campaign(
            &owner,
            raffle_campaign::msg::ExecuteMsg::Withdraw {
                beneficiary: beneficiary.to_string(),
            },
        )
        .unwrap();
    assert_eq!(chain.balance_of(&beneficiary), before + 2 * PRICE);
    assert_eq!(chain.balance_of(&chain.campaign_addr), 0);
    assert_eq!(chain.contract_balance(), Uint128::zero());

    // 7. Withdrawing again moves nothing
    let res = chain
        .execute_campaign(
            &owner,
            raffle_campaign::msg::ExecuteMsg::Withdraw {
                beneficiary: beneficiary.to_string(),
            },
        )
        .unwrap();
    assert!(res.messages.is_empty());
    assert_eq!(chain.balance_of(&beneficiary), before + 2 * PRICE);
    assert_eq!(chain.contract_balance(), Uint128::zero());
}

#[test]
fn test_registry_lookups() {
    let mut chain = Chain::new(3, 1);
    let person1 = chain.account("person1");
    let ticket = chain.buy(&person1).unwrap();

    let campaign_id: Addr = chain
        .query_registry(raffle_ticket::msg::QueryMsg::CampaignId {
            ticket_id: ticket.id,
        })
        .unwrap();
    assert_eq!(campaign_id, chain.campaign_addr);

    let price: Uint128 = chain
        .query_registry(raffle_ticket::msg::QueryMsg::Price {
            ticket_id: ticket.id,
        })
        .unwrap();
    assert_eq!(price, Uint128::new(PRICE));

    let err = chain
        .query_registry::<Addr>(raffle_ticket::msg::QueryMsg::CampaignId { ticket_id: 99 })
        .unwrap_err();
    assert!(matches!(err, StdError::NotFound { .. }));

    let err = chain
        .query_registry::<Uint128>(raffle_ticket::msg::QueryMsg::Price { ticket_id: 99 })
        .unwrap_err();
    assert!(matches!(err, StdError::NotFound { .. }));
}

#[test]
fn test_sell_out_independent_of_buyer_order() {
    const N: u64 = 7;
    let mut chain = Chain::new(N, 3);

    let names = ["gus", "carol", "frank", "alice", "erin", "bob", "dave"];
    let buyers: Vec<Addr> = names.iter().map(|n| chain.account(n)).collect();
    for buyer in &buyers {
        chain.buy(buyer).unwrap();
    }

    assert_eq!(chain.tickets_bought(), N);
    assert_eq!(chain.status(), CampaignStatus::Closed);
    assert_eq!(chain.contract_balance(), Uint128::new(N as u128 * PRICE));

    // Registry sequence order matches the campaign's purchase record
    let minted: raffle_ticket::msg::TicketsResponse = chain
        .query_registry(raffle_ticket::msg::QueryMsg::CampaignTickets {
            campaign: chain.campaign_addr.to_string(),
            start_after: None,
            limit: None,
        })
        .unwrap();
    let purchases: raffle_campaign::msg::PurchasesResponse =
        chain.query_campaign(raffle_campaign::msg::QueryMsg::Purchases {
            start_after: None,
            limit: None,
        });
    assert_eq!(minted.tickets.len(), N as usize);
    for (ticket, purchase) in minted.tickets.iter().zip(purchases.purchases.iter()) {
        assert_eq!(ticket.sequence, purchase.sequence);
        assert_eq!(ticket.holder, purchase.buyer);
        assert_eq!(ticket.campaign, chain.campaign_addr);
    }
    for (i, buyer) in buyers.iter().enumerate() {
        assert_eq!(&purchases.purchases[i].buyer, buyer);
    }
}

#[test]
fn test_deadline_end_to_end() {
    let mut chain = Chain::new(5, 1);
    let person1 = chain.account("person1");
    let person2 = chain.account("person2");
    let beneficiary = chain.account("beneficiary");
    chain.buy(&person1).unwrap();

    chain.height += DEADLINE_BLOCKS + 1;
    assert_eq!(chain.status(), CampaignStatus::Closed);

    let err = chain.buy(&person2).unwrap_err();
    assert!(matches!(
        err,
        raffle_campaign::ContractError::InvalidState { .. }
    ));
    assert_eq!(chain.balance_of(&person2), STARTING_BALANCE);

    let anyone = chain.account("anyone");
    let res = chain
        .execute_campaign(&anyone, raffle_campaign::msg::ExecuteMsg::Close {})
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "raffle_campaign_closed"));

    // Only sold tickets can win
    let owner = chain.owner.clone();
    let err = chain
        .execute_campaign(
            &owner,
            raffle_campaign::msg::ExecuteMsg::SetWinners { winners: vec![2] },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        raffle_campaign::ContractError::TicketNotFound { sequence: 2 }
    ));
    chain
        .execute_campaign(
            &owner,
            raffle_campaign::msg::ExecuteMsg::SetWinners { winners: vec![1] },
        )
        .unwrap();
    assert_eq!(chain.status(), CampaignStatus::WinnersSelected);

    chain
        .execute_campaign(
            &owner,
            raffle_campaign::msg::ExecuteMsg::Withdraw {
                beneficiary: beneficiary.to_string(),
            },
        )
        .unwrap();
    assert_eq!(chain.balance_of(&beneficiary), STARTING_BALANCE + PRICE);
    assert_eq!(chain.contract_balance(), Uint128::zero());
}
