pub mod carts;
pub mod orders;
pub mod payment_transactions;
pub mod products;
pub mod subscription_plans;
pub mod users;
