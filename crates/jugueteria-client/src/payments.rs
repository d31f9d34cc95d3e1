// Payment provider endpoints
// The backend builds the checkout preference from the authenticated user's
// cart, so the request body is empty.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPreference {
    #[serde(rename = "preferenceId")]
    pub preference_id: String,
}

#[derive(Serialize)]
struct Empty {}

impl ApiClient {
    /// Create a checkout preference with the payment provider.
    pub async fn create_payment_preference(&self) -> Result<PaymentPreference, ApiError> {
        self.post("payments/create-preference", &Empty {}).await
    }
}
