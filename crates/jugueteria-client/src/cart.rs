// Shopping cart endpoints
// The cart lives server-side, keyed by the authenticated user; every
// mutation returns the updated cart.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct CartItemRequest {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre")]
    pub product_name: String,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    pub subtotal: f64,
    #[serde(rename = "productoImageUrl", default)]
    pub image_url: Option<String>,
    /// Current stock, for client-side quantity validation
    #[serde(rename = "productoStock", default)]
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: f64,
}

#[derive(Debug, Serialize)]
struct QuantityUpdate {
    #[serde(rename = "cantidad")]
    quantity: u32,
}

impl ApiClient {
    pub async fn get_cart(&self) -> Result<Cart, ApiError> {
        self.get("cart").await
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    pub async fn add_cart_item(&self, item: &CartItemRequest) -> Result<Cart, ApiError> {
        self.post("cart/items", item).await
    }

    pub async fn update_cart_item(&self, product_id: i64, quantity: u32) -> Result<Cart, ApiError> {
        self.put(
            &format!("cart/items/{product_id}"),
            &QuantityUpdate { quantity },
        )
        .await
    }

    pub async fn remove_cart_item(&self, product_id: i64) -> Result<Cart, ApiError> {
        self.delete_json(&format!("cart/items/{product_id}")).await
    }

    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.delete("cart").await
    }
}
