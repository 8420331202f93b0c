use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::OrderDetail;
use crate::error::ApiError;
use crate::handlers::product::ProductResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::order::{
    CancelOrderUseCase, ListOrdersUseCase, OrderItemInput, PlaceOrderUseCase,
};

// ── POST /orders ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub items: Vec<PlaceOrderItem>,
}

#[derive(Deserialize)]
pub struct PlaceOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Serialize)]
pub struct PlaceOrderResponse {
    pub message: &'static str,
    pub order_id: Uuid,
}

pub async fn place_order(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ApiError> {
    let usecase = PlaceOrderUseCase {
        products: state.product_repo(),
        orders: state.order_repo(),
    };
    let items = body
        .items
        .into_iter()
        .map(|i| OrderItemInput {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect();
    let order_id = usecase.execute(identity.user_id, items).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            message: "Order placed",
            order_id,
        }),
    ))
}

// ── GET /orders ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub product: Option<ProductResponse>,
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            id: detail.order.id,
            total_amount: detail.order.total_amount,
            status: detail.order.status,
            created_at: detail.order.created_at,
            items: detail
                .items
                .into_iter()
                .map(|line| OrderItemResponse {
                    product_id: line.item.product_id,
                    quantity: line.item.quantity,
                    price: line.item.price,
                    product: line.product.map(Into::into),
                })
                .collect(),
        }
    }
}

pub async fn list_orders(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let usecase = ListOrdersUseCase {
        orders: state.order_repo(),
    };
    let details = usecase.execute(identity.user_id).await?;
    Ok(Json(details.into_iter().map(Into::into).collect()))
}

// ── DELETE /orders/{id} ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn cancel_order(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = CancelOrderUseCase {
        orders: state.order_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Order cancelled",
    }))
}
