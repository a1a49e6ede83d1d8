//! Decoding of WETH contract logs.

use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use serde::{Deserialize, Serialize};

use crate::contracts::abi::{IERC20, IWETH9};

/// A decoded WETH event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WethEvent {
    /// Ether wrapped into WETH.
    Deposit { owner: Address, amount: U256 },
    /// WETH unwrapped back into ether.
    Withdrawal { owner: Address, amount: U256 },
    /// WETH moved between accounts.
    Transfer { from: Address, to: Address, amount: U256 },
    /// Allowance set.
    Approval { owner: Address, spender: Address, amount: U256 },
}

/// A decoded event together with where it was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WethLog {
    pub block_number: Option<u64>,
    pub tx_hash: Option<TxHash>,
    pub event: WethEvent,
}

/// Topic-0 hashes of every event [`decode_log`] understands.
pub fn event_signatures() -> Vec<B256> {
    vec![
        IWETH9::Deposit::SIGNATURE_HASH,
        IWETH9::Withdrawal::SIGNATURE_HASH,
        IERC20::Transfer::SIGNATURE_HASH,
        IERC20::Approval::SIGNATURE_HASH,
    ]
}

/// Decode a log emitted by the WETH contract. Unknown or malformed logs yield `None`.
pub fn decode_log(log: &Log) -> Option<WethLog> {
    let topic0 = *log.topics().first()?;

    let event = if topic0 == IWETH9::Deposit::SIGNATURE_HASH {
        let e = log.log_decode::<IWETH9::Deposit>().ok()?.inner.data;
        WethEvent::Deposit { owner: e.dst, amount: e.wad }
    } else if topic0 == IWETH9::Withdrawal::SIGNATURE_HASH {
        let e = log.log_decode::<IWETH9::Withdrawal>().ok()?.inner.data;
        WethEvent::Withdrawal { owner: e.src, amount: e.wad }
    } else if topic0 == IERC20::Transfer::SIGNATURE_HASH {
        let e = log.log_decode::<IERC20::Transfer>().ok()?.inner.data;
        WethEvent::Transfer { from: e.from, to: e.to, amount: e.value }
    } else if topic0 == IERC20::Approval::SIGNATURE_HASH {
        let e = log.log_decode::<IERC20::Approval>().ok()?.inner.data;
        WethEvent::Approval { owner: e.owner, spender: e.spender, amount: e.value }
    } else {
        tracing::trace!(topic0 = %topic0, "Skipping unknown log");
        return None;
    };

    Some(WethLog {
        block_number: log.block_number,
        tx_hash: log.transaction_hash,
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, LogData};

    const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    const ALICE: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const BOB: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

    fn rpc_log(data: LogData, block_number: u64) -> Log {
        Log {
            inner: alloy::primitives::Log { address: WETH, data },
            block_number: Some(block_number),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_deposit() {
        let data = IWETH9::Deposit { dst: ALICE, wad: U256::from(5) }.encode_log_data();
        let decoded = decode_log(&rpc_log(data, 7)).unwrap();
        assert_eq!(decoded.block_number, Some(7));
        assert_eq!(decoded.event, WethEvent::Deposit { owner: ALICE, amount: U256::from(5) });
    }

    #[test]
    fn test_decode_withdrawal() {
        let data = IWETH9::Withdrawal { src: BOB, wad: U256::from(9) }.encode_log_data();
        let decoded = decode_log(&rpc_log(data, 1)).unwrap();
        assert_eq!(decoded.event, WethEvent::Withdrawal { owner: BOB, amount: U256::from(9) });
    }

    #[test]
    fn test_decode_transfer_and_approval() {
        let transfer = IERC20::Transfer { from: ALICE, to: BOB, value: U256::from(3) }.encode_log_data();
        assert_eq!(
            decode_log(&rpc_log(transfer, 1)).unwrap().event,
            WethEvent::Transfer { from: ALICE, to: BOB, amount: U256::from(3) }
        );

        let approval = IERC20::Approval { owner: ALICE, spender: BOB, value: U256::MAX }.encode_log_data();
        assert_eq!(
            decode_log(&rpc_log(approval, 1)).unwrap().event,
            WethEvent::Approval { owner: ALICE, spender: BOB, amount: U256::MAX }
        );
    }

    #[test]
    fn test_unknown_log_skipped() {
        let data = LogData::new_unchecked(vec![B256::repeat_byte(0xab)], Default::default());
        assert!(decode_log(&rpc_log(data, 1)).is_none());

        let empty = LogData::new_unchecked(Vec::new(), Default::default());
        assert!(decode_log(&rpc_log(empty, 1)).is_none());
    }

    #[test]
    fn test_signatures_cover_all_events() {
        assert_eq!(event_signatures().len(), 4);
    }
}
