//! Order placement and confirmation route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use dogear_core::OrderId;
use serde::Deserialize;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::OrderDetails;
use crate::services::orders::{OrderError, OrderService};
use crate::state::AppState;

/// Order placement form fields.
///
/// `items` carries a JSON array built client-side from the quantity inputs;
/// `total_amount` is the client's displayed total, used only for
/// cross-checking.
#[derive(Debug, Deserialize)]
pub struct CreateOrderForm {
    pub items: Option<String>,
    pub total_amount: Option<String>,
}

/// Query parameters for the confirmation page.
#[derive(Debug, Deserialize)]
pub struct ConfirmationQuery {
    pub order_id: Option<i32>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: OrderDetails,
}

/// Place an order for the logged-in customer.
///
/// Stock and pricing problems come back as a readable message on the catalog
/// page; only unexpected database failures surface as a 500.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Form(form): Form<CreateOrderForm>,
) -> Response {
    let Some(items) = form.items.filter(|s| !s.trim().is_empty()) else {
        return catalog_redirect_with_error("No items were submitted.");
    };

    let service = OrderService::new(state.pool());

    match service
        .create_order(customer.id, &items, form.total_amount.as_deref())
        .await
    {
        Ok(order_id) => {
            tracing::info!(customer_id = %customer.id, %order_id, "order placed");
            Redirect::to(&format!("/order/confirmation?order_id={order_id}")).into_response()
        }
        Err(e @ (OrderError::InvalidFormat(_) | OrderError::QuantityExceedsStock { .. })) => {
            tracing::info!(customer_id = %customer.id, error = %e, "order rejected");
            catalog_redirect_with_error(&e.to_string())
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Display the confirmation page for one of the customer's own orders.
pub async fn confirmation(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Query(query): Query<ConfirmationQuery>,
) -> Response {
    let Some(order_id) = query.order_id else {
        return Redirect::to("/").into_response();
    };

    let service = OrderService::new(state.pool());

    match service
        .get_confirmation(OrderId::new(order_id), customer.id)
        .await
    {
        Ok(order) => ConfirmationTemplate { order }.into_response(),
        Err(OrderError::NotFound(_)) => catalog_redirect_with_error("Order not found."),
        Err(e) => AppError::from(e).into_response(),
    }
}

fn catalog_redirect_with_error(message: &str) -> Response {
    let error = urlencoding::encode(message);
    Redirect::to(&format!("/?error={error}")).into_response()
}
