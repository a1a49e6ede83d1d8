//! Shared helpers for wrapper integration tests.
//!
//! Every test runs against alloy's mock transport: responses are queued on
//! an `Asserter` in the order the wrapper will issue its requests, and an
//! exhausted queue fails the request.

use alloy::primitives::{address, Address, Bytes, TxHash, U256, U64};
use serde_json::json;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::mock::Asserter;

pub const MAINNET_WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const SENDER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const OTHER: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
pub const SPENDER: Address = address!("3c44cdddb6a900fa2b585dd299e03d12fa4293bc");

/// Provider backed by a fresh asserter. No fillers, so each call issues exactly one request.
pub fn mocked_provider() -> (DynProvider, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter.clone())
        .erased();
    (provider, asserter)
}

/// Queue an `eth_chainId` response.
pub fn push_chain_id(asserter: &Asserter, chain_id: u64) {
    asserter.push_success(&U64::from(chain_id));
}

/// Queue an `eth_accounts` response.
pub fn push_accounts(asserter: &Asserter, accounts: &[Address]) {
    asserter.push_success(&accounts.to_vec());
}

/// Queue an `eth_call` response returning a single `uint256`.
pub fn push_uint_return(asserter: &Asserter, value: U256) {
    asserter.push_success(&Bytes::from(value.to_be_bytes::<32>().to_vec()));
}

/// Queue an `eth_getTransactionReceipt` response for a transaction still in the mempool.
pub fn push_pending_receipt(asserter: &Asserter) {
    asserter.push_success(&serde_json::Value::Null);
}

/// Queue an `eth_getTransactionReceipt` response for a transaction mined in `block`.
pub fn push_receipt(asserter: &Asserter, tx_hash: TxHash, block: u64, succeeded: bool) {
    asserter.push_success(&json!({
        "type": "0x2",
        "status": if succeeded { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0xb0a4",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": TxHash::repeat_byte(0xbb),
        "blockNumber": format!("{:#x}", block),
        "gasUsed": "0xb0a4",
        "effectiveGasPrice": "0x3b9aca00",
        "from": SENDER,
        "to": MAINNET_WETH,
        "contractAddress": null,
    }));
}

/// Queue an `eth_blockNumber` response.
pub fn push_block_number(asserter: &Asserter, block: u64) {
    asserter.push_success(&U64::from(block));
}
