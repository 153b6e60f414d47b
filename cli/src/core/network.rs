use std::fmt;

use serde::{Deserialize, Serialize};

/// The Ethereum networks the source resolver knows how to query.
///
/// Every strategy addresses a network differently: the explorer by host,
/// the verification registry by chain id, and the RPC provider by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Goerli,
    Sepolia,
}

impl Network {
    /// Parses a network identifier, falling back to mainnet for anything
    /// unrecognized.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "mainnet" => Network::Mainnet,
            "goerli" => Network::Goerli,
            "sepolia" => Network::Sepolia,
            other => {
                log::debug!("Unrecognized network {:?}, using mainnet", other);
                Network::Mainnet
            }
        }
    }

    /// The block explorer API endpoint for this network
    pub fn explorer_host(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.etherscan.io/api",
            Network::Goerli => "https://api-goerli.etherscan.io/api",
            Network::Sepolia => "https://api-sepolia.etherscan.io/api",
        }
    }

    /// The numeric chain id used by the verification registry
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Goerli => 5,
            Network::Sepolia => 11155111,
        }
    }

    /// The network name understood by the RPC provider
    pub fn provider_name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Goerli => "goerli",
            Network::Sepolia => "sepolia",
        }
    }
}

impl From<&str> for Network {
    fn from(identifier: &str) -> Self {
        Network::from_identifier(identifier)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}
