use serde::{Deserialize, Serialize};

use crate::core::{
    actions::resolve::{ResolutionResult, Resolve},
    resources::{
        bytecode::BytecodeResource, etherscan::EtherscanResource, sourcify::SourcifyResource,
    },
};

/// An inbound request to look up a contract's source
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub contract_address: Option<String>,
    pub network: Option<String>,
}

/// The answer to a [`VerifyRequest`], shaped like an HTTP response.
///
/// `status` is 200 with a payload, 400 when no address was given, 404 when
/// no source could be found and 500 for anything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyResponse {
    #[serde(skip)]
    pub status: u16,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ResolutionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyResponse {
    fn success(payload: ResolutionResult) -> Self {
        VerifyResponse {
            status: 200,
            ok: true,
            payload: Some(payload),
            error: None,
        }
    }

    fn failure(status: u16, error: String) -> Self {
        VerifyResponse {
            status,
            ok: false,
            payload: None,
            error: Some(error),
        }
    }
}

/// Resolves the contract named in `request` without persisting anything.
pub async fn verify<E, S, B>(resolve: &Resolve<E, S, B>, request: VerifyRequest) -> VerifyResponse
where
    E: EtherscanResource,
    S: SourcifyResource,
    B: BytecodeResource,
{
    let address = match request.contract_address.as_deref() {
        Some(address) if !address.is_empty() => address,
        _ => return VerifyResponse::failure(400, "contractAddress is required".to_owned()),
    };
    let network = request
        .network
        .as_deref()
        .filter(|network| !network.is_empty())
        .unwrap_or("mainnet");

    match resolve.resolve(address, network).await {
        Ok(ResolutionResult::NotFound) => {
            VerifyResponse::failure(404, "Source not found".to_owned())
        }
        Ok(payload) => VerifyResponse::success(payload),
        Err(e) => {
            log::error!("{}", e);
            VerifyResponse::failure(500, e.to_string())
        }
    }
}
