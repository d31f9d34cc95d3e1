// Product catalog endpoints
// Create and update are multipart: a `product` JSON part plus an optional
// `file` image part, matching the backend's upload contract.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
    #[serde(rename = "categoriaNombre", default)]
    pub category_name: String,
    #[serde(rename = "proveedorNombre", default)]
    pub supplier_name: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// Create/update payload. Sent as the JSON part of a multipart form.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRequest {
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
    /// Stock level that triggers a low-inventory alert
    #[serde(rename = "umbralAlerta")]
    pub alert_threshold: i64,
    #[serde(rename = "categoriaId")]
    pub category_id: i64,
    #[serde(rename = "proveedorId", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// An image file attached to a product create/update.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

fn product_form(request: &ProductRequest, image: Option<ImageUpload>) -> Result<Form, ApiError> {
    let json = serde_json::to_string(request)?;
    let mut form = Form::new().part(
        "product",
        Part::text(json).mime_str("application/json").map_err(ApiError::Http)?,
    );
    if let Some(image) = image {
        form = form.part("file", Part::bytes(image.bytes).file_name(image.file_name));
    }
    Ok(form)
}

impl ApiClient {
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("products").await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        self.get(&format!("products/{id}")).await
    }

    pub async fn create_product(
        &self,
        request: &ProductRequest,
        image: Option<ImageUpload>,
    ) -> Result<Product, ApiError> {
        let form = product_form(request, image)?;
        self.post_multipart("products", form).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: &ProductRequest,
        image: Option<ImageUpload>,
    ) -> Result<Product, ApiError> {
        let form = product_form(request, image)?;
        self.put_multipart(&format!("products/{id}"), form).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("products/{id}")).await
    }
}
