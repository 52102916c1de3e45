//! Wire DTOs: explicit request shapes and JSON mapping helpers, decoupled
//! from the stored records. camelCase on the wire; the internal version
//! token never appears here.

use serde::Deserialize;

use orderdesk_core::{CategoryId, CustomerId, ProductId};
use orderdesk_customers::Customer;
use orderdesk_orders::{LineDetail, Order, OrderDetail};
use orderdesk_products::{Category, Product};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
}

/// PUT /orders/{id} body. `customerId` is accepted for shape compatibility
/// with the create request, but the customer reference of an existing order
/// never changes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
}

/// PUT /orders/{id}/status body. The status arrives as a string and is
/// parsed explicitly so malformed values get a 400 with a useful message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Full-row update; the body id must match the path id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: u64,
    pub category_id: CategoryId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub category_id: CategoryId,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn order_to_json(order: Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id,
        "customerId": order.customer_id,
        "status": order.status,
        "updatedAt": order.updated_at.to_rfc3339(),
    })
}

pub fn order_detail_to_json(detail: OrderDetail) -> serde_json::Value {
    let total = detail.total();
    serde_json::json!({
        "id": detail.order.id,
        "customerId": detail.order.customer_id,
        "status": detail.order.status,
        "updatedAt": detail.order.updated_at.to_rfc3339(),
        "lineItems": detail
            .lines
            .into_iter()
            .map(line_to_json)
            .collect::<Vec<_>>(),
        "total": total,
    })
}

fn line_to_json(line: LineDetail) -> serde_json::Value {
    serde_json::json!({
        "productId": line.product_id,
        "productName": line.product_name,
        "quantity": line.quantity,
        "unitPrice": line.unit_price,
        "total": line.total,
    })
}

pub fn category_to_json(category: Category) -> serde_json::Value {
    serde_json::json!({
        "id": category.id,
        "name": category.name,
    })
}

pub fn customer_to_json(customer: Customer) -> serde_json::Value {
    serde_json::json!({
        "id": customer.id,
        "name": customer.name,
        "address": customer.address,
        "phone": customer.phone,
    })
}

pub fn product_to_json(product: Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id,
        "name": product.name,
        "price": product.price,
        "categoryId": product.category_id,
    })
}
