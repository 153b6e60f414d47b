use async_trait::async_trait;
use ethers::providers::ProviderError;

use crate::core::network::Network;

/// Defines the interface for reading deployed bytecode from a chain.
///
/// Implementations build a provider scoped to the requested network.
#[async_trait]
pub trait BytecodeResource {
    /// Fetch the runtime bytecode at `address` as a `0x`-prefixed hex string.
    ///
    /// An address without code yields `"0x"`.
    async fn get_code(
        &self,
        network: Network,
        address: &str,
        project_key: Option<&str>,
    ) -> Result<String, ProviderError>;
}
