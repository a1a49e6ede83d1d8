//! Command-line front end for the WETH wrapper.
//!
//! ```text
//! weth-wrapper --config weth.toml wrap 0.5
//! weth-wrapper weth-balance 0xf39f...2266
//! weth-wrapper to-base 1.25 --decimals 6
//! ```

use std::path::PathBuf;

use alloy::primitives::{Address, TxHash, U256};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use weth_wrapper::config::{load_config, WrapperConfig};
use weth_wrapper::observability::logging;
use weth_wrapper::{from_base_units, to_base_units, ConfirmationStatus, WethResult, WethWrapper, DEFAULT_DECIMALS};

#[derive(Parser)]
#[command(name = "weth-wrapper")]
#[command(about = "Wrap, unwrap and approve WETH", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RPC URL from the configuration.
    #[arg(short, long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Network(NetworkCommand),
    /// Convert a decimal amount to base units
    ToBase {
        value: String,
        #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,
    },
    /// Convert base units to a decimal amount
    FromBase {
        value: String,
        #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,
    },
}

/// Commands that talk to the node.
#[derive(Subcommand)]
enum NetworkCommand {
    /// Wrap ether into WETH
    Wrap {
        amount: String,
        /// Amount is already in wei
        #[arg(long)]
        wei: bool,
    },
    /// Unwrap WETH into ether
    Unwrap {
        amount: String,
        #[arg(long)]
        wei: bool,
    },
    /// Ether balance
    Balance { address: Option<Address> },
    /// WETH balance
    WethBalance { address: Option<Address> },
    /// WETH allowance granted to the spender
    Allowance { owner: Option<Address> },
    /// Set the spender allowance
    Approve {
        amount: String,
        #[arg(long)]
        wei: bool,
    },
    /// Grant the spender an unlimited allowance
    ApproveUnlimited,
    /// Wait for a transaction to be confirmed
    Wait { tx_hash: TxHash },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WrapperConfig::default(),
    };
    if let Some(url) = cli.rpc_url {
        config.rpc.url = url;
    }

    logging::init_logging(&config.observability.log_level);

    let output = match cli.command {
        Commands::ToBase { value, decimals } => json!({
            "base_units": to_base_units(&value, decimals)?.to_string(),
        }),
        Commands::FromBase { value, decimals } => json!({
            "value": from_base_units(value.as_str(), decimals)?,
        }),
        Commands::Network(command) => run(&config, command).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(config: &WrapperConfig, command: NetworkCommand) -> WethResult<Value> {
    let wrapper = WethWrapper::from_config(config)?;

    let output = match command {
        NetworkCommand::Wrap { amount, wei } => {
            let tx_hash = wrapper.wrap(wei_amount(&amount, wei)?, None).await?;
            json!({ "tx_hash": tx_hash })
        }
        NetworkCommand::Unwrap { amount, wei } => {
            let tx_hash = wrapper.unwrap(wei_amount(&amount, wei)?, None).await?;
            json!({ "tx_hash": tx_hash })
        }
        NetworkCommand::Balance { address } => balance_json(wrapper.get_ether_balance(address).await?)?,
        NetworkCommand::WethBalance { address } => balance_json(wrapper.get_weth_balance(address).await?)?,
        NetworkCommand::Allowance { owner } => balance_json(wrapper.get_proxy_allowance(owner).await?)?,
        NetworkCommand::Approve { amount, wei } => {
            let tx_hash = wrapper.set_proxy_allowance(wei_amount(&amount, wei)?, None).await?;
            json!({ "tx_hash": tx_hash })
        }
        NetworkCommand::ApproveUnlimited => {
            let tx_hash = wrapper.set_unlimited_proxy_allowance(None).await?;
            json!({ "tx_hash": tx_hash })
        }
        NetworkCommand::Wait { tx_hash } => match wrapper.await_transaction_mined(tx_hash).await? {
            ConfirmationStatus::Confirmed { block_number } => {
                json!({ "status": "confirmed", "block_number": block_number })
            }
            ConfirmationStatus::Confirming { current, required } => {
                json!({ "status": "confirming", "confirmations": current, "required": required })
            }
            ConfirmationStatus::Failed(reason) => json!({ "status": "failed", "reason": reason }),
        },
    };

    Ok(output)
}

/// Amounts are ether unless `--wei` is given.
fn wei_amount(amount: &str, wei: bool) -> WethResult<U256> {
    if wei {
        weth_wrapper::IntoBaseUnits::into_base_units(amount)
    } else {
        to_base_units(amount, DEFAULT_DECIMALS)
    }
}

fn balance_json(wei: U256) -> WethResult<Value> {
    Ok(json!({
        "wei": wei.to_string(),
        "ether": from_base_units(wei, DEFAULT_DECIMALS)?,
    }))
}
