use std::{env, path::PathBuf};

use clap::Args;
use thiserror::Error;

use crate::core::{
    actions::{
        persist::PersistError,
        resolve::ResolutionResult,
        verify,
        verify::{VerifyRequest, VerifyResponse},
        Persist, Resolve,
    },
    config::ResolverConfig,
    network::Network,
};
use crate::resources::{
    artifacts::LocalSourceStore, bytecode::Infura, etherscan::Etherscan, sourcify::Sourcify,
};

#[derive(Args)]
pub struct Fetch {
    /// The address of the deployed contract
    pub address: String,

    /// The network the contract lives on: mainnet, goerli or sepolia
    #[arg(long, default_value = "mainnet")]
    pub network: String,

    /// Save the resolved source to the output directory
    #[arg(long)]
    pub save: bool,

    /// Where saved sources are written
    #[arg(long, default_value = "tmp-sources")]
    pub out_dir: PathBuf,

    /// Etherscan API key, used for every network without its own key
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub etherscan_api_key: Option<String>,

    /// Etherscan API key for goerli
    #[arg(long, env = "ETHERSCAN_API_KEY_GOERLI", hide_env_values = true)]
    pub goerli_etherscan_api_key: Option<String>,

    /// Etherscan API key for sepolia
    #[arg(long, env = "ETHERSCAN_API_KEY_SEPOLIA", hide_env_values = true)]
    pub sepolia_etherscan_api_key: Option<String>,

    /// Infura project key for the on-chain bytecode fallback
    #[arg(long, env = "INFURA_KEY", hide_env_values = true)]
    pub infura_key: Option<String>,

    /// Send every explorer request to this URL instead of the network's Etherscan host
    #[arg(long, hide = true)]
    pub etherscan_url: Option<String>,
}

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum FetchError {
    /// The lookup did not produce a payload
    #[error("RequestError ({status}): {message}")]
    RequestError { status: u16, message: String },
    /// Error related to saving the source
    #[error("PersistError: {0}")]
    PersistError(#[from] PersistError),
    /// Error related to printing the response
    #[error("OutputError: {0}")]
    OutputError(#[from] serde_json::Error),
    /// Error related to the working directory
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
}

/// Resolves a contract's source and prints the response.
///
/// The command uses the [`crate::core::actions::Resolve`] action with the
/// Etherscan, Sourcify and Infura resources, and the local file-based
/// source store when `--save` is given.
impl Fetch {
    pub async fn run(&self) -> Result<(), FetchError> {
        // Build the resolver
        let resolve = Resolve::new(
            self.config(),
            self.etherscan(),
            Sourcify::new(),
            Infura::new(),
        );

        // Run the lookup
        let response = verify(
            &resolve,
            VerifyRequest {
                contract_address: Some(self.address.clone()),
                network: Some(self.network.clone()),
            },
        )
        .await;
        let pretty = colored_json::to_colored_json_auto(&serde_json::to_value(&response)?)?;
        println!("{}", pretty);

        let payload = into_payload(response)?;

        // Save the source
        if self.save {
            let out_dir = env::current_dir()?.join(&self.out_dir);
            let artifact = Persist::new(LocalSourceStore::new(out_dir))
                .persist(&payload, &self.address)?;
            println!("=> Saved {:?} to {}", artifact.artifact_type, artifact.path);
        }

        Ok(())
    }

    fn etherscan(&self) -> Etherscan {
        match &self.etherscan_url {
            Some(url) => Etherscan::with_base_url(url.clone()),
            None => Etherscan::new(),
        }
    }

    fn config(&self) -> ResolverConfig {
        let mut config =
            ResolverConfig::new(self.etherscan_api_key.clone(), self.infura_key.clone());
        if let Some(api_key) = &self.goerli_etherscan_api_key {
            config = config.with_network_explorer_api_key(Network::Goerli, api_key.clone());
        }
        if let Some(api_key) = &self.sepolia_etherscan_api_key {
            config = config.with_network_explorer_api_key(Network::Sepolia, api_key.clone());
        }
        config
    }
}

/// Turns anything but a 200 response into an error, so the command exits non-zero.
fn into_payload(response: VerifyResponse) -> Result<ResolutionResult, FetchError> {
    match response.payload {
        Some(payload) if response.status == 200 => Ok(payload),
        _ => Err(FetchError::RequestError {
            status: response.status,
            message: response.error.unwrap_or_default(),
        }),
    }
}
