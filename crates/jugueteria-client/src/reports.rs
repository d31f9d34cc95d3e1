// Sales reporting endpoints (admin)

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySale {
    /// YYYY-MM-DD
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSale {
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "quantitySold")]
    pub quantity_sold: i64,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    #[serde(rename = "numeroPedidos")]
    pub order_count: i64,
    #[serde(rename = "totalVentas")]
    pub total_sales: f64,
    #[serde(rename = "ventasPorDia", default)]
    pub daily_sales: Vec<DailySale>,
    #[serde(rename = "topProductosVendidos", default)]
    pub top_products: Vec<ProductSale>,
}

impl ApiClient {
    /// Aggregated sales for an inclusive date range (YYYY-MM-DD bounds).
    pub async fn sales_report(&self, start_date: &str, end_date: &str) -> Result<SalesReport, ApiError> {
        self.get_with_query(
            "reports/sales",
            &[("startDate", start_date), ("endDate", end_date)],
        )
        .await
    }
}
