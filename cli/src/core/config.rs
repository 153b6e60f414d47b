use std::collections::HashMap;

use crate::core::network::Network;

/// Process-wide keys used by the source resolver.
///
/// Built once at startup and handed to [`crate::core::actions::Resolve`].
/// Missing keys are not rejected here; the upstream that needs them fails
/// at request time instead.
#[derive(Clone, Debug, Default)]
pub struct ResolverConfig {
    /// Default block explorer API key, used for mainnet and for any network
    /// without a dedicated key
    pub explorer_api_key: Option<String>,

    /// Network-specific block explorer API keys
    pub network_explorer_api_keys: HashMap<Network, String>,

    /// Project key for the RPC provider
    pub rpc_project_key: Option<String>,
}

impl ResolverConfig {
    pub fn new(explorer_api_key: Option<String>, rpc_project_key: Option<String>) -> Self {
        ResolverConfig {
            explorer_api_key,
            network_explorer_api_keys: HashMap::new(),
            rpc_project_key,
        }
    }

    pub fn with_network_explorer_api_key(mut self, network: Network, api_key: String) -> Self {
        self.network_explorer_api_keys.insert(network, api_key);
        self
    }

    /// Selects the explorer API key for a network, falling back to the
    /// default key.
    pub fn explorer_api_key_for(&self, network: Network) -> Option<&str> {
        self.network_explorer_api_keys
            .get(&network)
            .or(self.explorer_api_key.as_ref())
            .map(String::as_str)
    }
}
