// Order endpoints: checkout, history, staff management, returns, POS sales

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// ISO timestamp as sent by the backend
    #[serde(rename = "fechaPedido")]
    pub placed_at: String,
    #[serde(rename = "estado")]
    pub status: String,
    pub total: f64,
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
    #[serde(rename = "detalles", default)]
    pub items: Vec<OrderDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre")]
    pub product_name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    /// Quantity already returned, when a return has been processed
    #[serde(rename = "cantidadDevuelta", default)]
    pub returned_quantity: Option<u32>,
}

/// Card-token payload produced by the payment provider's widget.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentData {
    pub token: String,
    #[serde(rename = "paymentMethodId")]
    pub payment_method_id: String,
    pub installments: u32,
    #[serde(rename = "payerEmail")]
    pub payer_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
    #[serde(rename = "paymentData")]
    pub payment_data: PaymentData,
}

#[derive(Debug, Clone, Serialize)]
pub struct PosSaleItem {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    pub quantity: u32,
}

/// In-store sale rung up at the POS terminal, no shipping involved.
#[derive(Debug, Clone, Serialize)]
pub struct PosOrderRequest {
    pub total: f64,
    pub items: Vec<PosSaleItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnItem {
    #[serde(rename = "detallePedidoId")]
    pub order_detail_id: i64,
    #[serde(rename = "cantidadADevolver")]
    pub quantity: u32,
    #[serde(rename = "motivo")]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnRequest {
    #[serde(rename = "pedidoId")]
    pub order_id: i64,
    /// Whether returned units go back into sellable stock
    #[serde(rename = "devolverAlStock")]
    pub restock: bool,
    pub items: Vec<ReturnItem>,
}

impl ApiClient {
    /// Place an order from the authenticated user's cart.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        self.post("orders", request).await
    }

    /// Order history of the authenticated user.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("orders/my-orders").await
    }

    /// Every order in the system (staff).
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("orders").await
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, ApiError> {
        self.get(&format!("orders/{id}")).await
    }

    /// Update an order's status. The backend expects the new status as a
    /// bare JSON string body.
    pub async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, ApiError> {
        self.put(&format!("orders/{id}/status"), status).await
    }

    pub async fn process_return(&self, request: &ReturnRequest) -> Result<Order, ApiError> {
        self.post("orders/returns", request).await
    }

    /// The order's invoice as PDF bytes.
    pub async fn download_invoice(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("orders/{id}/invoice")).await
    }

    /// Register an in-store sale (POS terminal).
    pub async fn create_physical_sale(&self, request: &PosOrderRequest) -> Result<Order, ApiError> {
        self.post("orders/physical-sale", request).await
    }
}
