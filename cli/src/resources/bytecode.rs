use std::str::FromStr;

use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider, ProviderError},
    types::Address,
};

use crate::core::{network::Network, resources::bytecode::BytecodeResource};

const DEFAULT_ENDPOINT: &str = "https://{network}.infura.io/v3/{key}";

/// Reads deployed bytecode through Infura.
///
/// A provider is built per call so each lookup hits the endpoint of the
/// network it asks about. `{network}` and `{key}` in the endpoint template
/// are replaced with the provider network name and the project key.
pub struct Infura {
    endpoint: String,
}

impl Infura {
    pub fn new() -> Self {
        Infura::with_endpoint(DEFAULT_ENDPOINT.to_owned())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        Infura { endpoint }
    }

    fn url_for(&self, network: Network, project_key: Option<&str>) -> String {
        self.endpoint
            .replace("{network}", network.provider_name())
            .replace("{key}", project_key.unwrap_or_default())
    }
}

impl Default for Infura {
    fn default() -> Self {
        Infura::new()
    }
}

#[async_trait]
impl BytecodeResource for Infura {
    async fn get_code(
        &self,
        network: Network,
        address: &str,
        project_key: Option<&str>,
    ) -> Result<String, ProviderError> {
        let provider = Provider::<Http>::try_from(self.url_for(network, project_key).as_str())
            .map_err(|e| ProviderError::CustomError(e.to_string()))?;
        let address =
            Address::from_str(address).map_err(|e| ProviderError::CustomError(e.to_string()))?;

        let code = provider.get_code(address, None).await?;
        Ok(format!("0x{}", hex::encode(code)))
    }
}
