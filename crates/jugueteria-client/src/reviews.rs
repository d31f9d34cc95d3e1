// Product review endpoints
// Reading a product's reviews is public; writing requires a session and
// deleting is an admin operation.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    /// 1-5 stars
    #[serde(rename = "calificacion")]
    pub rating: u8,
    #[serde(rename = "comentario")]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(rename = "nombreUsuario")]
    pub user_name: String,
    #[serde(rename = "calificacion")]
    pub rating: u8,
    #[serde(rename = "comentario")]
    pub comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "productoNombre", default)]
    pub product_name: String,
    #[serde(rename = "productoImageUrl", default)]
    pub product_image_url: Option<String>,
}

impl ApiClient {
    pub async fn product_reviews(&self, product_id: i64) -> Result<Vec<Review>, ApiError> {
        self.get(&format!("reviews/product/{product_id}")).await
    }

    pub async fn create_review(
        &self,
        product_id: i64,
        request: &ReviewRequest,
    ) -> Result<Review, ApiError> {
        self.post(&format!("reviews/product/{product_id}"), request)
            .await
    }

    pub async fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get("reviews").await
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("reviews/{id}")).await
    }
}
