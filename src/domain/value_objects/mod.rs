pub mod auth;
pub mod carts;
pub mod checkout;
pub mod enums;
pub mod orders;
pub mod payment_webhook;
pub mod products;
pub mod subscription_plans;
