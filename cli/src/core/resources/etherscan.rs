use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::network::Network;

/// Interface for interacting with Etherscan.
/// The Etherscan resource is responsible for fetching verified source code
/// from the block explorer of a given network.
#[async_trait]
pub trait EtherscanResource {
    /// Fetch the verified source code of a contract.
    ///
    /// The `apikey` parameter is omitted from the request when `api_key` is `None`.
    async fn get_source_code(
        &self,
        network: Network,
        address: &str,
        api_key: Option<&str>,
    ) -> Result<GetSourceCodeResponse, EtherscanError>;
}

#[derive(Error, Debug)]
pub enum EtherscanError {
    /// Transport error
    #[error("RequestError: {0}")]
    RequestError(#[from] reqwest::Error),
    /// The response did not have the expected shape
    #[error("DecodeError: {0}")]
    DecodeError(#[from] serde_json::Error),
    /// The explorer answered with something unusable
    #[error("UpstreamError: {0}")]
    UpstreamError(String),
}

/// Represents the response from the Etherscan API for the source code endpoint
/// https://docs.etherscan.io/api-endpoints/contracts#get-contract-source-code-for-verified-contract-source-codes
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSourceCodeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: Vec<SourceCodeResult>,
}

/// Represents a single result in the Etherscan API for the source code endpoint
/// https://docs.etherscan.io/api-endpoints/contracts#get-contract-source-code-for-verified-contract-source-codes
///
/// `SourceCode` is either plain Solidity or a JSON document wrapping several files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SourceCodeResult {
    pub source_code: String,
    #[serde(rename = "ABI")]
    pub abi: String,
    pub contract_name: String,
    pub compiler_version: String,
    pub optimization_used: String,
    pub runs: String,
    pub constructor_arguments: String,
    #[serde(rename = "EVMVersion")]
    pub evm_version: String,
    pub library: String,
    pub license_type: String,
    pub proxy: String,
    pub implementation: String,
    pub swarm_source: String,
}

impl SourceCodeResult {
    /// Whether Etherscan holds verified source for the contract
    pub fn has_source(&self) -> bool {
        !self.source_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::GetSourceCodeResponse;

    #[test]
    fn can_parse_unverified_response() {
        let response: GetSourceCodeResponse = serde_json::from_str(
            r#"{
                "status": "1",
                "message": "OK",
                "result": [{
                    "SourceCode": "",
                    "ABI": "Contract source code not verified",
                    "ContractName": "",
                    "CompilerVersion": "",
                    "OptimizationUsed": "",
                    "Runs": "",
                    "ConstructorArguments": "",
                    "EVMVersion": "Default",
                    "Library": "",
                    "LicenseType": "Unknown",
                    "Proxy": "0",
                    "Implementation": "",
                    "SwarmSource": ""
                }]
            }"#,
        )
        .unwrap();
        let result = response.result.first().unwrap();
        assert!(!result.has_source());
        assert_eq!(result.abi, "Contract source code not verified");
        assert_eq!(result.evm_version, "Default");
    }

    #[test]
    fn rejects_error_response() {
        // Etherscan reports errors with a string in place of the result list
        let response = serde_json::from_str::<GetSourceCodeResponse>(
            r#"{"status": "0", "message": "NOTOK", "result": "Invalid API Key"}"#,
        );
        assert!(response.is_err());
    }
}
