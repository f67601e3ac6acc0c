use serde::Deserialize;

use crate::{auth::AuthUser, domain::value_objects::carts::CartOwner};

pub mod admin;
pub mod auth;
pub mod carts;
pub mod orders;
pub mod payment_webhook;
pub mod products;
pub mod subscription_plans;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// Picks the cart identity for a request: the authenticated user wins over
/// an anonymous session id.
pub fn resolve_cart_owner(auth: Option<&AuthUser>, session_id: Option<String>) -> Option<CartOwner> {
    match (auth, session_id) {
        (Some(user), _) => Some(CartOwner::User(user.user_id)),
        (None, Some(session_id)) => Some(CartOwner::Session(session_id)),
        (None, None) => None,
    }
}
