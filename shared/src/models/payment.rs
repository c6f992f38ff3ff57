//! Payment QR Model

use serde::{Deserialize, Serialize};

/// QR query (`?amount=&label=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QrCodeQuery {
    pub amount: Option<String>,
    pub label: Option<String>,
}

/// QR response carrying a `data:image/png;base64,...` URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub data_url: String,
}
