//! Well-known contract addresses per chain.

use alloy::primitives::{address, Address};

/// WETH9 deployments keyed by chain ID.
const WETH_ADDRESSES: &[(u64, Address)] = &[
    (1, address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")),
    (3, address!("c778417E063141139Fce010982780140Aa0cD5Ab")),
    (4, address!("c778417E063141139Fce010982780140Aa0cD5Ab")),
    (5, address!("B4FBF271143F4FBf7B91A5ded31805e42b2208d6")),
    (10, address!("4200000000000000000000000000000000000006")),
    (42, address!("d0A1E359811322d97991E03f863a0C30C2cF029C")),
    (8453, address!("4200000000000000000000000000000000000006")),
    (42161, address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1")),
    (11155111, address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14")),
];

/// ERC-20 asset proxy (allowance spender) deployments keyed by chain ID.
const SPENDER_ADDRESSES: &[(u64, Address)] = &[
    (1, address!("95E6F48254609A6ee006F7D493c8e5fB97094ceF")),
];

fn lookup(table: &[(u64, Address)], chain_id: u64) -> Option<Address> {
    table
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, address)| *address)
}

/// WETH9 address for `chain_id`, if known.
pub fn weth_address(chain_id: u64) -> Option<Address> {
    lookup(WETH_ADDRESSES, chain_id)
}

/// Allowance spender for `chain_id`, if known.
pub fn spender_address(chain_id: u64) -> Option<Address> {
    lookup(SPENDER_ADDRESSES, chain_id)
}
