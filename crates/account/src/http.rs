//! HTTP implementation of the account store.

use async_trait::async_trait;
use reqwest::StatusCode;

use dzcart_cart::{Cart, CartItem};
use dzcart_core::UserId;
use dzcart_delivery::Address;

use crate::{AccountError, AccountStore};

/// Client of the storefront account API.
pub struct HttpAccountStore {
    api_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpAccountStore {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: Some(token.into()),
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, AccountError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(AccountError::Api(
            resp.status().as_u16(),
            resp.text().await.unwrap_or_default(),
        ))
    }
}

#[async_trait]
impl AccountStore for HttpAccountStore {
    async fn fetch_cart(&self, user: UserId) -> Result<Option<Cart>, AccountError> {
        let url = format!("{}/carts/{}", self.api_url, user);
        let resp = self
            .request(self.http.get(&url))
            .send()
            .await
            .map_err(|e| AccountError::Network(e.to_string()))?;

        // Absent cart is the degenerate "no data yet" case, not a failure.
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resp = Self::check(resp).await?;
        let cart = resp
            .json::<Cart>()
            .await
            .map_err(|e| AccountError::Parse(e.to_string()))?;
        Ok(Some(cart))
    }

    async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<Cart, AccountError> {
        let url = format!("{}/carts/{}", self.api_url, user);
        let resp = self
            .request(self.http.put(&url).json(&items))
            .send()
            .await
            .map_err(|e| AccountError::Network(e.to_string()))?;

        let resp = Self::check(resp).await?;
        resp.json::<Cart>()
            .await
            .map_err(|e| AccountError::Parse(e.to_string()))
    }

    async fn fetch_addresses(&self, user: UserId) -> Result<Vec<Address>, AccountError> {
        let url = format!("{}/addresses/{}", self.api_url, user);
        let resp = self
            .request(self.http.get(&url))
            .send()
            .await
            .map_err(|e| AccountError::Network(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let resp = Self::check(resp).await?;
        resp.json::<Vec<Address>>()
            .await
            .map_err(|e| AccountError::Parse(e.to_string()))
    }

    async fn save_address(&self, user: UserId, address: Address) -> Result<Address, AccountError> {
        let url = format!("{}/addresses/{}", self.api_url, user);
        let resp = self
            .request(self.http.post(&url).json(&address))
            .send()
            .await
            .map_err(|e| AccountError::Network(e.to_string()))?;

        let resp = Self::check(resp).await?;
        resp.json::<Address>()
            .await
            .map_err(|e| AccountError::Parse(e.to_string()))
    }

    async fn delete_address(&self, user: UserId, index: usize) -> Result<(), AccountError> {
        let url = format!("{}/addresses/{}/{}", self.api_url, user, index);
        let resp = self
            .request(self.http.delete(&url))
            .send()
            .await
            .map_err(|e| AccountError::Network(e.to_string()))?;

        Self::check(resp).await?;
        Ok(())
    }
}
