pub mod auth;
pub mod carts;
pub mod checkout;
pub mod orders;
pub mod payment_webhook;
pub mod products;
pub mod sample_data;
pub mod subscription_plans;
