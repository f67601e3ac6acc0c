use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            orders::InsertOrderEntity,
            payment_transactions::InsertPaymentTransactionEntity,
        },
        repositories::{
            carts::CartRepository, orders::OrderRepository,
            payment_transactions::PaymentTransactionRepository,
            products::ProductRepository,
        },
        value_objects::{
            carts::CartOwner,
            checkout::CheckoutResponse,
            enums::{order_statuses::OrderStatus, payment_methods::PaymentMethod},
            orders::OrderItemSnapshot,
        },
    },
    infrastructure::payments::xendit_client::{CreatedInvoice, XenditClient},
};

pub const INVOICE_CURRENCY: &str = "IDR";

/// Payment options offered on every invoice, independent of the method the
/// buyer picked at checkout (the gateway's invoice page lets them switch).
pub const INVOICE_PAYMENT_METHODS: [&str; 4] =
    ["CREDIT_CARD", "BANK_TRANSFER", "QRIS", "EWALLET"];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_invoice(
        &self,
        external_id: &str,
        amount: i64,
        payer_email: &str,
        description: &str,
        currency: &str,
        payment_methods: Vec<String>,
    ) -> AnyResult<CreatedInvoice>;
}

#[async_trait]
impl PaymentGateway for XenditClient {
    async fn create_invoice(
        &self,
        external_id: &str,
        amount: i64,
        payer_email: &str,
        description: &str,
        currency: &str,
        payment_methods: Vec<String>,
    ) -> AnyResult<CreatedInvoice> {
        self.create_invoice(
            external_id,
            amount,
            payer_email,
            description,
            currency,
            &payment_methods,
        )
        .await
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("payment creation failed")]
    PaymentCreation(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
            CheckoutError::PaymentCreation(_) | CheckoutError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type CheckoutResult<T> = std::result::Result<T, CheckoutError>;

pub struct CheckoutUseCase<C, P, O, T, G>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    cart_repository: Arc<C>,
    product_repository: Arc<P>,
    order_repository: Arc<O>,
    transaction_repository: Arc<T>,
    payment_gateway: Arc<G>,
}

impl<C, P, O, T, G> CheckoutUseCase<C, P, O, T, G>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(
        cart_repository: Arc<C>,
        product_repository: Arc<P>,
        order_repository: Arc<O>,
        transaction_repository: Arc<T>,
        payment_gateway: Arc<G>,
    ) -> Self {
        Self {
            cart_repository,
            product_repository,
            order_repository,
            transaction_repository,
            payment_gateway,
        }
    }

    /// Turns the owner's cart into a pending order and issues a gateway
    /// invoice for it.
    ///
    /// If the gateway call fails the order stays persisted as `pending`
    /// without an invoice id and the cart is left intact, so nothing the
    /// buyer selected is lost; the caller re-attempts checkout. There is no
    /// lock between reading the cart and clearing it, so a double-submit can
    /// create two orders from the same cart.
    pub async fn checkout(
        &self,
        owner: CartOwner,
        user_email: String,
        payment_method: PaymentMethod,
    ) -> CheckoutResult<CheckoutResponse> {
        let user_id = match &owner {
            CartOwner::User(user_id) => Some(*user_id),
            CartOwner::Session(_) => None,
        };

        let cart_lines = self
            .cart_repository
            .find_by_owner(&owner)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "checkout: failed to load cart");
                CheckoutError::Internal(err)
            })?;

        if cart_lines.is_empty() {
            let err = CheckoutError::EmptyCart;
            warn!(
                status = err.status_code().as_u16(),
                "checkout: attempted with empty cart"
            );
            return Err(err);
        }

        let mut total_amount: i64 = 0;
        let mut items: Vec<OrderItemSnapshot> = Vec::with_capacity(cart_lines.len());

        for line in &cart_lines {
            let product = self
                .product_repository
                .find_by_id(line.product_id)
                .await
                .map_err(|err| {
                    error!(
                        product_id = %line.product_id,
                        db_error = ?err,
                        "checkout: failed to load product"
                    );
                    CheckoutError::Internal(err)
                })?;

            let Some(product) = product else {
                // Stale cart reference; the line is dropped from the order.
                warn!(
                    product_id = %line.product_id,
                    "checkout: cart references a vanished product, skipping line"
                );
                continue;
            };

            let line_total = i64::from(line.quantity) * line.price;
            total_amount += line_total;
            items.push(OrderItemSnapshot {
                product_id: line.product_id,
                product_name: product.name,
                quantity: line.quantity,
                price: line.price,
                total: line_total,
            });
        }

        let items_json = serde_json::to_value(&items)
            .map_err(|err| CheckoutError::Internal(err.into()))?;

        let order_id = self
            .order_repository
            .insert(InsertOrderEntity {
                user_id,
                user_email: user_email.clone(),
                items: items_json,
                total_amount,
                status: OrderStatus::Pending.to_string(),
                payment_method: payment_method.to_string(),
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "checkout: failed to insert order");
                CheckoutError::Internal(err)
            })?;

        info!(
            %order_id,
            total_amount,
            line_count = items.len(),
            "checkout: order created, requesting gateway invoice"
        );

        let external_id = format!("order_{order_id}");
        let description = format!("Order #{}", &order_id.to_string()[..8]);
        let invoice = self
            .payment_gateway
            .create_invoice(
                &external_id,
                total_amount,
                &user_email,
                &description,
                INVOICE_CURRENCY,
                INVOICE_PAYMENT_METHODS
                    .iter()
                    .map(|method| method.to_string())
                    .collect(),
            )
            .await
            .map_err(|err| {
                error!(
                    %order_id,
                    total_amount,
                    error = ?err,
                    "checkout: gateway invoice creation failed, order stays pending"
                );
                CheckoutError::PaymentCreation(err)
            })?;

        self.order_repository
            .set_gateway_invoice_id(order_id, invoice.id.clone())
            .await
            .map_err(|err| {
                error!(
                    %order_id,
                    invoice_id = %invoice.id,
                    db_error = ?err,
                    "checkout: failed to persist invoice id on order"
                );
                CheckoutError::Internal(err)
            })?;

        self.transaction_repository
            .insert(InsertPaymentTransactionEntity {
                order_id,
                user_id,
                amount: total_amount,
                currency: INVOICE_CURRENCY.to_string(),
                status: OrderStatus::Pending.to_string(),
                payment_method: payment_method.to_string(),
                gateway_invoice_id: Some(invoice.id.clone()),
            })
            .await
            .map_err(|err| {
                error!(
                    %order_id,
                    db_error = ?err,
                    "checkout: failed to record payment transaction"
                );
                CheckoutError::Internal(err)
            })?;

        self.cart_repository
            .clear_owner(&owner)
            .await
            .map_err(|err| {
                error!(
                    %order_id,
                    db_error = ?err,
                    "checkout: failed to clear cart after invoice creation"
                );
                CheckoutError::Internal(err)
            })?;

        info!(
            %order_id,
            invoice_id = %invoice.id,
            total_amount,
            "checkout: completed, payment url issued"
        );

        Ok(CheckoutResponse {
            order_id,
            payment_url: invoice.invoice_url,
            total_amount,
        })
    }
}

#[cfg(test)]
mod tests;
