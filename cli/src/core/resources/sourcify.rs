use async_trait::async_trait;
use thiserror::Error;

/// Interface for interacting with the Sourcify verification registry.
#[async_trait]
pub trait SourcifyResource {
    /// Fetch the full-match listing of a contract.
    ///
    /// Only an HTTP 200 counts as success; the body is returned untouched.
    async fn get_full_match(&self, chain_id: u64, address: &str) -> Result<String, SourcifyError>;
}

#[derive(Error, Debug)]
pub enum SourcifyError {
    /// Transport error
    #[error("RequestError: {0}")]
    RequestError(#[from] reqwest::Error),
    /// Any status other than 200
    #[error("UnexpectedStatusCode: {0}")]
    UnexpectedStatusCode(u16),
}
