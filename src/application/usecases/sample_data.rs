use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::domain::{
    entities::{
        products::InsertProductEntity, subscription_plans::InsertSubscriptionPlanEntity,
    },
    repositories::{products::ProductRepository, subscription_plans::SubscriptionPlanRepository},
};

pub struct SampleDataUseCase<P, S>
where
    P: ProductRepository + Send + Sync + 'static,
    S: SubscriptionPlanRepository + Send + Sync + 'static,
{
    product_repository: Arc<P>,
    plan_repository: Arc<S>,
}

impl<P, S> SampleDataUseCase<P, S>
where
    P: ProductRepository + Send + Sync + 'static,
    S: SubscriptionPlanRepository + Send + Sync + 'static,
{
    pub fn new(product_repository: Arc<P>, plan_repository: Arc<S>) -> Self {
        Self {
            product_repository,
            plan_repository,
        }
    }

    /// Seeds the starter catalog and pricing plans. A non-empty catalog is
    /// left untouched so a repeated call cannot duplicate either.
    pub async fn init_data(&self) -> Result<&'static str> {
        let product_count = self.product_repository.count().await.map_err(|err| {
            error!(db_error = ?err, "sample_data: failed to count products");
            err
        })?;

        if product_count > 0 {
            return Ok("Sample data already exists");
        }

        for product in sample_products() {
            self.product_repository.insert(product).await.map_err(|err| {
                error!(db_error = ?err, "sample_data: failed to insert product");
                err
            })?;
        }

        for plan in sample_plans() {
            self.plan_repository.insert(plan).await.map_err(|err| {
                error!(db_error = ?err, "sample_data: failed to insert plan");
                err
            })?;
        }

        info!("sample_data: starter catalog and plans seeded");

        Ok("Sample data initialized successfully")
    }
}

// Prices are IDR, which has no minor unit.
fn sample_products() -> Vec<InsertProductEntity> {
    vec![
        InsertProductEntity {
            name: "Premium Subscription (Monthly)".to_string(),
            description: "Get access to all premium features with monthly billing".to_string(),
            price: 99_000,
            stock: 1000,
            category: "subscription".to_string(),
            images: serde_json::json!([
                "https://images.pexels.com/photos/7563569/pexels-photo-7563569.jpeg"
            ]),
        },
        InsertProductEntity {
            name: "Basic Package".to_string(),
            description: "Essential features for getting started".to_string(),
            price: 49_000,
            stock: 1000,
            category: "package".to_string(),
            images: serde_json::json!([
                "https://images.pexels.com/photos/6995253/pexels-photo-6995253.jpeg"
            ]),
        },
        InsertProductEntity {
            name: "Pro Package".to_string(),
            description: "Advanced features for power users".to_string(),
            price: 149_000,
            stock: 1000,
            category: "package".to_string(),
            images: serde_json::json!([
                "https://images.pexels.com/photos/9169180/pexels-photo-9169180.jpeg"
            ]),
        },
    ]
}

fn sample_plans() -> Vec<InsertSubscriptionPlanEntity> {
    vec![
        InsertSubscriptionPlanEntity {
            name: "Basic Plan".to_string(),
            description: "Perfect for individuals".to_string(),
            price: 79_000,
            billing_cycle: "monthly".to_string(),
            features: serde_json::json!(["Basic Features", "Email Support", "5GB Storage"]),
        },
        InsertSubscriptionPlanEntity {
            name: "Pro Plan".to_string(),
            description: "Great for small teams".to_string(),
            price: 199_000,
            billing_cycle: "monthly".to_string(),
            features: serde_json::json!([
                "All Basic Features",
                "Priority Support",
                "50GB Storage",
                "Advanced Analytics"
            ]),
        },
    ]
}
