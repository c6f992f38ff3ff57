//! Common response bodies

use serde::{Deserialize, Serialize};

/// Bare acknowledgement (`{"ok": true}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
