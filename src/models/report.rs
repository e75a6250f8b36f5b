use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TopSeller {
    pub seller_id: i64,
    pub seller_name: String,
    pub sales_count: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesChartItem {
    pub date: NaiveDate,
    pub count: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub sales_today: i64,
    pub sales_month: i64,
    pub revenue_today: f64,
    pub revenue_month: f64,
    pub cars_available: i64,
    pub cars_sold_month: i64,
    pub top_sellers: Vec<TopSeller>,
    pub sales_chart: Vec<SalesChartItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesByDateItem {
    pub date: NaiveDate,
    pub sales_count: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct SalesByDateResponse {
    pub period: String,
    pub data: Vec<SalesByDateItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesBySellerItem {
    pub seller_id: i64,
    pub seller_name: String,
    pub sales_count: i64,
    pub total_revenue: f64,
    pub average_price: f64,
}

#[derive(Debug, Serialize)]
pub struct SalesBySellerResponse {
    pub data: Vec<SalesBySellerItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesByCarItem {
    pub brand: String,
    pub model: String,
    pub sales_count: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct SalesByCarResponse {
    pub data: Vec<SalesByCarItem>,
}
