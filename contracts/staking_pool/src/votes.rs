//! Representative (voting-weight) token the pool mints and burns 1:1 with
//! staked principal.
//!
//! The pool only depends on this two-method interface. A Stellar Asset
//! Contract whose admin is the pool satisfies it, as does any custom
//! governance token exposing the same signatures.
//!
//! `burn` takes votes back from the staker on every unstake. If the staker
//! has moved votes away, the burn fails and the whole unstake is rolled
//! back until they return them. Use a non-transferable votes token when
//! that matters.

use soroban_sdk::{contractclient, Address, Env};

use crate::{token_amount, ContractError};

#[contractclient(name = "VotesClient")]
pub trait VotesInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
}

pub fn mint(
    env: &Env,
    votes: &Option<Address>,
    to: &Address,
    amount: u128,
) -> Result<(), ContractError> {
    if let Some(token) = votes {
        VotesClient::new(env, token).mint(to, &token_amount(amount)?);
    }
    Ok(())
}

pub fn burn(
    env: &Env,
    votes: &Option<Address>,
    from: &Address,
    amount: u128,
) -> Result<(), ContractError> {
    if let Some(token) = votes {
        VotesClient::new(env, token).burn(from, &token_amount(amount)?);
    }
    Ok(())
}
