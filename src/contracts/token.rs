//! ERC-20 token abstraction.
//!
//! Thin typed handle over an `IERC20` binding: reads are bounded by the RPC
//! timeout, writes are built here and submitted by the caller.

use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::client::contract_call;
use crate::blockchain::transaction::{self, TxParams};
use crate::blockchain::types::WethResult;
use crate::contracts::abi::IERC20;

/// An ERC-20 token at a fixed address.
#[derive(Debug, Clone)]
pub struct Erc20Token {
    contract: IERC20::IERC20Instance<DynProvider>,
    rpc_timeout: Duration,
}

impl Erc20Token {
    /// Bind the token at `address`.
    pub fn new(address: Address, provider: DynProvider, rpc_timeout: Duration) -> Self {
        Self {
            contract: IERC20::new(address, provider),
            rpc_timeout,
        }
    }

    /// Token contract address.
    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Token balance of `owner` in base units.
    pub async fn balance_of(&self, owner: Address) -> WethResult<U256> {
        contract_call(self.rpc_timeout, "balanceOf", self.contract.balanceOf(owner).call()).await
    }

    /// Amount `spender` may still move on behalf of `owner`.
    pub async fn allowance(&self, owner: Address, spender: Address) -> WethResult<U256> {
        contract_call(
            self.rpc_timeout,
            "allowance",
            self.contract.allowance(owner, spender).call(),
        )
        .await
    }

    /// `approve(spender, amount)` from `params.from`, ready to submit.
    pub fn approve_request(&self, spender: Address, amount: U256, params: &TxParams) -> TransactionRequest {
        transaction::apply(self.contract.approve(spender, amount), params).into_transaction_request()
    }
}
