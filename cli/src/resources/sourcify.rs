use async_trait::async_trait;
use reqwest::StatusCode;

use crate::core::resources::sourcify::{SourcifyError, SourcifyResource};

const DEFAULT_BASE_URL: &str = "https://repo.sourcify.dev";

/// The Sourcify resource implementation backed by the public repository.
pub struct Sourcify {
    client: reqwest::Client,
    base_url: String,
}

impl Sourcify {
    pub fn new() -> Self {
        Sourcify::with_base_url(DEFAULT_BASE_URL.to_owned())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Sourcify {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn full_match_url(&self, chain_id: u64, address: &str) -> String {
        format!(
            "{}/contracts/full_match/{}/{}/",
            self.base_url, chain_id, address
        )
    }
}

impl Default for Sourcify {
    fn default() -> Self {
        Sourcify::new()
    }
}

#[async_trait]
impl SourcifyResource for Sourcify {
    async fn get_full_match(&self, chain_id: u64, address: &str) -> Result<String, SourcifyError> {
        let response = self
            .client
            .get(self.full_match_url(chain_id, address))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            status => Err(SourcifyError::UnexpectedStatusCode(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::Sourcify;
    use crate::core::resources::sourcify::{SourcifyError, SourcifyResource};

    const ADDRESS: &str = "0x027f1fe8BbC2a7E9fE97868E82c6Ec6939086c52";

    #[test]
    fn builds_full_match_url() {
        let sourcify = Sourcify::new();
        assert_eq!(
            sourcify.full_match_url(5, ADDRESS),
            "https://repo.sourcify.dev/contracts/full_match/5/0x027f1fe8BbC2a7E9fE97868E82c6Ec6939086c52/"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn returns_listing_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/contracts/full_match/5/{}/", ADDRESS)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><a href=\"metadata.json\">metadata.json</a></html>", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sourcify = Sourcify::with_base_url(format!("{}/", server.uri()));
        let body = sourcify.get_full_match(5, ADDRESS).await.unwrap();
        assert_eq!(body, "<html><a href=\"metadata.json\">metadata.json</a></html>");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_200_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let sourcify = Sourcify::with_base_url(server.uri());
        let result = sourcify.get_full_match(1, ADDRESS).await;
        assert!(matches!(result, Err(SourcifyError::UnexpectedStatusCode(404))));
    }
}
