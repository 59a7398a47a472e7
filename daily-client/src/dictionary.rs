use async_trait::async_trait;
use daily_core::{RemoteDictionary, ValidityError};
use reqwest::{Client, StatusCode};

/// Dictionary API answering 200 for known words and 404 otherwise.
pub struct HttpDictionary {
    client: Client,
    base_url: String,
}

impl HttpDictionary {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RemoteDictionary for HttpDictionary {
    async fn lookup(&self, word: &str) -> Result<bool, ValidityError> {
        let url = format!("{}/{}", self.base_url, word.to_lowercase());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ValidityError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(ValidityError::UnexpectedStatus(status.as_u16())),
        }
    }
}
