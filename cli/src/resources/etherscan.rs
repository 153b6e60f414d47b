use async_trait::async_trait;
use serde_json::Value;

use crate::core::{
    network::Network,
    resources::etherscan::{EtherscanError, EtherscanResource, GetSourceCodeResponse},
};

/// Represents the resource for the Etherscan API client
pub struct Etherscan {
    client: reqwest::Client,

    /// Overrides the per-network API host
    base_url: Option<String>,
}

impl Etherscan {
    pub fn new() -> Self {
        Etherscan {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Sends every request to `base_url` regardless of network
    pub fn with_base_url(base_url: String) -> Self {
        Etherscan {
            client: reqwest::Client::new(),
            base_url: Some(base_url),
        }
    }

    fn host_for(&self, network: Network) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| network.explorer_host())
    }
}

impl Default for Etherscan {
    fn default() -> Self {
        Etherscan::new()
    }
}

#[async_trait]
impl EtherscanResource for Etherscan {
    /// https://docs.etherscan.io/api-endpoints/contracts#get-contract-source-code-for-verified-contract-source-codes
    async fn get_source_code(
        &self,
        network: Network,
        address: &str,
        api_key: Option<&str>,
    ) -> Result<GetSourceCodeResponse, EtherscanError> {
        let mut params = vec![
            ("module", "contract"),
            ("action", "getsourcecode"),
            ("address", address),
        ];
        if let Some(api_key) = api_key {
            params.push(("apikey", api_key));
        }

        let body = self
            .client
            .get(self.host_for(network))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        // Errors come back with a message in place of the result list
        if let Some(message) = body.get("result").and_then(Value::as_str) {
            return Err(EtherscanError::UpstreamError(message.to_owned()));
        }
        Ok(serde_json::from_value(body)?)
    }
}
