//! HTTP client for network-based API calls

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::error::ApiResponse;
use shared::models::{
    CreateOrderRequest, CreateOrderResponse, LoginRequest, LoginResponse, MeResponse, MenuItem,
    MenuItemCreate, MenuItemUpdate, OkResponse, Order, QrCodeResponse, RegisterRequest,
    RegisterResponse, SalesSummary,
};

/// HTTP client for making network requests to the bakery server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token when signed in
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ========== Verbs ==========

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Make a GET request and return the raw body (PDF downloads)
    pub async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let request = self.authorized(self.client.get(self.url(path)));
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.put(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.delete(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", e, text)))
    }

    /// Turn a non-2xx response into an error, preferring the server's
    /// structured `ApiResponse` body over the bare status
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        if let Some(err) = serde_json::from_str::<ApiResponse<()>>(&text)
            .ok()
            .and_then(ApiResponse::into_error)
        {
            return Err(ClientError::Api(err));
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Internal(format!("{}: {}", status, text)),
        })
    }

    // ========== Auth API ==========

    /// Register a new account
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> ClientResult<RegisterResponse> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.map(str::to_string),
        };
        self.post("api/auth/register", &request).await
    }

    /// Login with username and password; the token is kept for later calls
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("api/auth/login", &request).await?;
        self.token = Some(response.token.clone());
        tracing::debug!(username = %response.user.username, "Logged in");
        Ok(response)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<MeResponse> {
        self.get("api/auth/me").await
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        let _: OkResponse = self.post_empty("api/auth/logout").await?;
        self.token = None;
        Ok(())
    }

    // ========== Menu API ==========

    pub async fn menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.get("api/menu").await
    }

    pub async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.post("api/menu", item).await
    }

    pub async fn update_menu_item(&self, id: i64, update: &MenuItemUpdate) -> ClientResult<MenuItem> {
        self.put(&format!("api/menu/{}", id), update).await
    }

    pub async fn delete_menu_item(&self, id: i64) -> ClientResult<()> {
        let _: OkResponse = self.delete(&format!("api/menu/{}", id)).await?;
        Ok(())
    }

    // ========== Orders API ==========

    pub async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse> {
        self.post("api/order", request).await
    }

    pub async fn get_order(&self, order_id: i64) -> ClientResult<Order> {
        self.get(&format!("api/order/{}", order_id)).await
    }

    /// Invoice PDF bytes
    pub async fn invoice_pdf(&self, order_id: i64) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("api/order/{}/invoice", order_id)).await
    }

    // ========== Sales API ==========

    /// Monthly summary; `month` is `YYYY-MM`
    pub async fn sales(&self, month: &str) -> ClientResult<SalesSummary> {
        self.get(&format!("api/sales?month={}", month)).await
    }

    /// Monthly sales report PDF bytes
    pub async fn sales_pdf(&self, month: &str) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("api/sales/pdf?month={}", month)).await
    }

    // ========== Payment API ==========

    /// Payment QR code as a `data:image/png;base64,...` URL
    pub async fn payment_qr(&self, amount: f64, label: Option<&str>) -> ClientResult<String> {
        let mut request = self
            .client
            .get(self.url("api/qrcode"))
            .query(&[("amount", shared::money::format_amount(amount))]);
        if let Some(label) = label {
            request = request.query(&[("label", label)]);
        }
        let response: QrCodeResponse = Self::handle_response(request.send().await?).await?;
        Ok(response.data_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(client.url("api/menu"), "http://localhost:3000/api/menu");
        assert_eq!(client.url("/api/menu"), "http://localhost:3000/api/menu");
    }

    #[test]
    fn login_token_is_kept() {
        let client = HttpClient::new(&ClientConfig::default())
            .unwrap()
            .with_token("t0k3n");
        assert_eq!(client.token(), Some("t0k3n"));
    }
}
