use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{
    address::is_address,
    config::ResolverConfig,
    network::Network,
    resources::{
        bytecode::BytecodeResource,
        etherscan::{EtherscanResource, SourceCodeResult},
        sourcify::SourcifyResource,
    },
};

/// The strategies tried when resolving a contract's source, in the order
/// they are attempted.
pub const FALLBACK_ORDER: [Strategy; 3] =
    [Strategy::Explorer, Strategy::Registry, Strategy::Onchain];

/// A single way of obtaining a contract's source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Verified source from the block explorer
    Explorer,
    /// Full-match listing from the verification registry
    Registry,
    /// Deployed runtime bytecode read over RPC
    Onchain,
}

/// A validated request to resolve a contract's source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub address: String,
    pub network: Network,
}

impl ResolutionRequest {
    pub fn new(address: &str, network: Network) -> Result<Self, ResolveError> {
        if !is_address(address) {
            return Err(ResolveError::InvalidAddress(address.to_owned()));
        }
        Ok(ResolutionRequest {
            address: address.to_owned(),
            network,
        })
    }
}

/// Verified source as returned by the block explorer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtherscanSource {
    /// Plain Solidity, or a JSON document wrapping several files
    pub source: String,
    pub contract_name: String,
    pub compiler_version: String,
    /// "1" when the optimizer was enabled, "0" otherwise
    pub optimization_used: String,
    pub evm_version: String,
    pub abi: String,
    pub raw: SourceCodeResult,
}

impl From<SourceCodeResult> for EtherscanSource {
    fn from(result: SourceCodeResult) -> Self {
        EtherscanSource {
            source: result.source_code.clone(),
            contract_name: result.contract_name.clone(),
            compiler_version: result.compiler_version.clone(),
            optimization_used: result.optimization_used.clone(),
            evm_version: result.evm_version.clone(),
            abi: result.abi.clone(),
            raw: result,
        }
    }
}

/// The outcome of a resolution, tagged by where the source was found.
///
/// Switch on the variant before reading any payload. The `sourcify` payload
/// is whatever the registry served, usually a directory listing rather than
/// compilable Solidity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "foundOn", rename_all = "lowercase")]
pub enum ResolutionResult {
    Etherscan(EtherscanSource),
    Sourcify {
        source: String,
        raw: String,
    },
    /// `bytecode` is `"0x"` when the address holds no code
    Onchain {
        bytecode: String,
    },
    #[serde(rename = "none")]
    NotFound,
}

impl ResolutionResult {
    /// The `foundOn` tag of this result
    pub fn found_on(&self) -> &'static str {
        match self {
            ResolutionResult::Etherscan(_) => "etherscan",
            ResolutionResult::Sourcify { .. } => "sourcify",
            ResolutionResult::Onchain { .. } => "onchain",
            ResolutionResult::NotFound => "none",
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// The address is not a well-formed chain address
    #[error("Invalid address")]
    InvalidAddress(String),
}

/// Resolves a deployed contract address to its source.
///
/// The explorer, the verification registry and the chain itself are asked
/// in [`FALLBACK_ORDER`]; the first strategy that yields usable source wins
/// and the rest are never called. Each strategy is attempted exactly once
/// and upstream failures are logged rather than returned.
pub struct Resolve<E: EtherscanResource, S: SourcifyResource, B: BytecodeResource> {
    /// Upstream keys
    config: ResolverConfig,

    /// The Etherscan resource
    etherscan_resource: E,

    /// The Sourcify resource
    sourcify_resource: S,

    /// The on-chain bytecode resource
    bytecode_resource: B,
}

impl<E: EtherscanResource, S: SourcifyResource, B: BytecodeResource> Resolve<E, S, B> {
    pub fn new(
        config: ResolverConfig,
        etherscan_resource: E,
        sourcify_resource: S,
        bytecode_resource: B,
    ) -> Self {
        Resolve {
            config,
            etherscan_resource,
            sourcify_resource,
            bytecode_resource,
        }
    }

    /// Resolves `address` on `network`.
    ///
    /// Unrecognized networks are treated as mainnet. Fails only when the
    /// address is malformed, in which case no upstream is contacted.
    pub async fn resolve(
        &self,
        address: &str,
        network: &str,
    ) -> Result<ResolutionResult, ResolveError> {
        let request = ResolutionRequest::new(address, Network::from_identifier(network))?;
        Ok(self.resolve_request(&request).await)
    }

    /// Runs the fallback chain for an already validated request.
    pub async fn resolve_request(&self, request: &ResolutionRequest) -> ResolutionResult {
        for strategy in FALLBACK_ORDER {
            if let Some(result) = self.attempt(strategy, request).await {
                log::info!(
                    "Resolved {} on {} via {}",
                    request.address,
                    request.network,
                    result.found_on()
                );
                return result;
            }
        }
        ResolutionResult::NotFound
    }

    async fn attempt(
        &self,
        strategy: Strategy,
        request: &ResolutionRequest,
    ) -> Option<ResolutionResult> {
        log::debug!("Trying {:?} for {}", strategy, request.address);
        match strategy {
            Strategy::Explorer => self.from_explorer(request).await,
            Strategy::Registry => self.from_registry(request).await,
            Strategy::Onchain => self.from_chain(request).await,
        }
    }

    /// Looks up verified source on the block explorer.
    async fn from_explorer(&self, request: &ResolutionRequest) -> Option<ResolutionResult> {
        let api_key = self.config.explorer_api_key_for(request.network);
        let response = self
            .etherscan_resource
            .get_source_code(request.network, &request.address, api_key)
            .await;

        match response {
            Ok(response) => response
                .result
                .into_iter()
                .next()
                .filter(SourceCodeResult::has_source)
                .map(|result| ResolutionResult::Etherscan(result.into())),
            Err(e) => {
                log::warn!("Etherscan fetch failed: {}", e);
                None
            }
        }
    }

    /// Looks up a full match on the verification registry.
    async fn from_registry(&self, request: &ResolutionRequest) -> Option<ResolutionResult> {
        let chain_id = request.network.chain_id();
        match self
            .sourcify_resource
            .get_full_match(chain_id, &request.address)
            .await
        {
            Ok(body) => Some(ResolutionResult::Sourcify {
                source: body.clone(),
                raw: body,
            }),
            Err(e) => {
                log::warn!("Sourcify fetch failed: {}", e);
                None
            }
        }
    }

    /// Reads the deployed runtime bytecode. An empty account still counts
    /// as a result.
    async fn from_chain(&self, request: &ResolutionRequest) -> Option<ResolutionResult> {
        match self
            .bytecode_resource
            .get_code(
                request.network,
                &request.address,
                self.config.rpc_project_key.as_deref(),
            )
            .await
        {
            Ok(bytecode) => Some(ResolutionResult::Onchain { bytecode }),
            Err(e) => {
                log::error!("Failed to fetch on-chain code: {}", e);
                None
            }
        }
    }
}
