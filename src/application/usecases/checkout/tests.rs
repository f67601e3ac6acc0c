use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::{
    application::usecases::payment_webhook::PaymentWebhookUseCase,
    domain::{
        entities::{
            cart_items::{CartItemEntity, InsertCartItemEntity},
            orders::OrderEntity,
            payment_transactions::PaymentTransactionEntity,
            products::{InsertProductEntity, ProductEntity},
        },
        repositories::{
            carts::MockCartRepository, orders::MockOrderRepository,
            payment_transactions::MockPaymentTransactionRepository,
            products::MockProductRepository,
        },
        value_objects::products::ListProductsFilter,
    },
};

fn cart_line(owner: &CartOwner, product_id: Uuid, quantity: i32, price: i64) -> CartItemEntity {
    let (user_id, session_id) = match owner {
        CartOwner::User(user_id) => (Some(*user_id), None),
        CartOwner::Session(session_id) => (None, Some(session_id.clone())),
    };

    CartItemEntity {
        id: Uuid::new_v4(),
        user_id,
        session_id,
        product_id,
        quantity,
        price,
        created_at: Utc::now(),
    }
}

fn product(id: Uuid, name: &str, price: i64) -> ProductEntity {
    ProductEntity {
        id,
        name: name.to_string(),
        description: String::new(),
        price,
        stock: 1000,
        category: "package".to_string(),
        images: serde_json::json!([]),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_invoice() -> CreatedInvoice {
    CreatedInvoice {
        id: "inv_test_1".to_string(),
        invoice_url: "https://invoice.test/inv_test_1".to_string(),
    }
}

#[tokio::test]
async fn checkout_totals_matched_lines_and_clears_the_cart() {
    let owner = CartOwner::Session("sess-1".to_string());
    let product_a = Uuid::new_v4();
    let product_b = Uuid::new_v4();
    let order_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    let lines = vec![
        cart_line(&owner, product_a, 2, 50),
        cart_line(&owner, product_b, 1, 30),
    ];
    carts
        .expect_find_by_owner()
        .times(1)
        .returning(move |_| Ok(lines.clone()));
    let expected_owner = owner.clone();
    carts
        .expect_clear_owner()
        .withf(move |owner| *owner == expected_owner)
        .times(1)
        .returning(|_| Ok(2));

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(product(id, "Basic Package", 50))));

    let mut orders = MockOrderRepository::new();
    orders
        .expect_insert()
        .withf(|order| {
            order.total_amount == 130
                && order.status == "pending"
                && order.payment_method == "CREDIT_CARD"
                && order.user_id.is_none()
        })
        .times(1)
        .returning(move |_| Ok(order_id));
    orders
        .expect_set_gateway_invoice_id()
        .withf(move |id, invoice_id| *id == order_id && invoice_id == "inv_test_1")
        .times(1)
        .returning(|_, _| Ok(()));

    let mut transactions = MockPaymentTransactionRepository::new();
    transactions
        .expect_insert()
        .withf(move |tx| {
            tx.order_id == order_id
                && tx.amount == 130
                && tx.currency == "IDR"
                && tx.status == "pending"
                && tx.gateway_invoice_id.as_deref() == Some("inv_test_1")
        })
        .times(1)
        .returning(|_| Ok(Uuid::new_v4()));

    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_invoice()
        .withf(move |external_id, amount, payer_email, _, currency, _| {
            external_id == format!("order_{order_id}")
                && *amount == 130
                && payer_email == "a@b.com"
                && currency == "IDR"
        })
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(test_invoice()));

    let usecase = CheckoutUseCase::new(
        Arc::new(carts),
        Arc::new(products),
        Arc::new(orders),
        Arc::new(transactions),
        Arc::new(gateway),
    );

    let response = usecase
        .checkout(owner, "a@b.com".to_string(), PaymentMethod::CreditCard)
        .await
        .expect("checkout should succeed");

    assert_eq!(response.order_id, order_id);
    assert_eq!(response.total_amount, 130);
    assert_eq!(response.payment_url, "https://invoice.test/inv_test_1");
}

#[tokio::test]
async fn empty_cart_is_rejected_before_any_order_exists() {
    let mut carts = MockCartRepository::new();
    carts.expect_find_by_owner().returning(|_| Ok(Vec::new()));
    carts.expect_clear_owner().never();

    let mut orders = MockOrderRepository::new();
    orders.expect_insert().never();

    let mut gateway = MockPaymentGateway::new();
    gateway.expect_create_invoice().never();

    let usecase = CheckoutUseCase::new(
        Arc::new(carts),
        Arc::new(MockProductRepository::new()),
        Arc::new(orders),
        Arc::new(MockPaymentTransactionRepository::new()),
        Arc::new(gateway),
    );

    let result = usecase
        .checkout(
            CartOwner::Session("sess-1".to_string()),
            "a@b.com".to_string(),
            PaymentMethod::CreditCard,
        )
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test]
async fn gateway_failure_keeps_pending_order_and_cart() {
    let owner = CartOwner::User(Uuid::new_v4());
    let product_id = Uuid::new_v4();
    let order_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    let lines = vec![cart_line(&owner, product_id, 1, 75)];
    carts
        .expect_find_by_owner()
        .returning(move |_| Ok(lines.clone()));
    carts.expect_clear_owner().never();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(product(id, "Pro Package", 75))));

    let mut orders = MockOrderRepository::new();
    orders
        .expect_insert()
        .withf(|order| order.status == "pending" && order.total_amount == 75)
        .times(1)
        .returning(move |_| Ok(order_id));
    orders.expect_set_gateway_invoice_id().never();

    let mut transactions = MockPaymentTransactionRepository::new();
    transactions.expect_insert().never();

    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_invoice()
        .times(1)
        .returning(|_, _, _, _, _, _| Err(anyhow::anyhow!("503 from gateway")));

    let usecase = CheckoutUseCase::new(
        Arc::new(carts),
        Arc::new(products),
        Arc::new(orders),
        Arc::new(transactions),
        Arc::new(gateway),
    );

    let result = usecase
        .checkout(owner, "a@b.com".to_string(), PaymentMethod::Qris)
        .await;

    assert!(matches!(result, Err(CheckoutError::PaymentCreation(_))));
}

#[tokio::test]
async fn vanished_product_line_is_dropped_from_the_order() {
    let owner = CartOwner::Session("sess-1".to_string());
    let kept_product = Uuid::new_v4();
    let vanished_product = Uuid::new_v4();
    let order_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    let lines = vec![
        cart_line(&owner, kept_product, 2, 50),
        cart_line(&owner, vanished_product, 5, 999),
    ];
    carts
        .expect_find_by_owner()
        .returning(move |_| Ok(lines.clone()));
    carts.expect_clear_owner().returning(|_| Ok(1));

    let mut products = MockProductRepository::new();
    products.expect_find_by_id().returning(move |id| {
        if id == kept_product {
            Ok(Some(product(id, "Basic Package", 50)))
        } else {
            Ok(None)
        }
    });

    let mut orders = MockOrderRepository::new();
    orders
        .expect_insert()
        .withf(|order| {
            let items: Vec<OrderItemSnapshot> =
                serde_json::from_value(order.items.clone()).unwrap();
            order.total_amount == 100 && items.len() == 1 && items[0].total == 100
        })
        .times(1)
        .returning(move |_| Ok(order_id));
    orders
        .expect_set_gateway_invoice_id()
        .returning(|_, _| Ok(()));

    let mut transactions = MockPaymentTransactionRepository::new();
    transactions
        .expect_insert()
        .withf(|tx| tx.amount == 100)
        .returning(|_| Ok(Uuid::new_v4()));

    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_invoice()
        .withf(|_, amount, _, _, _, _| *amount == 100)
        .returning(|_, _, _, _, _, _| Ok(test_invoice()));

    let usecase = CheckoutUseCase::new(
        Arc::new(carts),
        Arc::new(products),
        Arc::new(orders),
        Arc::new(transactions),
        Arc::new(gateway),
    );

    let response = usecase
        .checkout(owner, "a@b.com".to_string(), PaymentMethod::CreditCard)
        .await
        .expect("checkout should succeed");

    assert_eq!(response.total_amount, 100);
}

#[tokio::test]
async fn zero_value_cart_still_checks_out() {
    let owner = CartOwner::Session("sess-1".to_string());
    let product_id = Uuid::new_v4();
    let order_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    let lines = vec![cart_line(&owner, product_id, 1, 0)];
    carts
        .expect_find_by_owner()
        .returning(move |_| Ok(lines.clone()));
    carts.expect_clear_owner().returning(|_| Ok(1));

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(product(id, "Free Sample", 0))));

    let mut orders = MockOrderRepository::new();
    orders
        .expect_insert()
        .withf(|order| order.total_amount == 0)
        .returning(move |_| Ok(order_id));
    orders
        .expect_set_gateway_invoice_id()
        .returning(|_, _| Ok(()));

    let mut transactions = MockPaymentTransactionRepository::new();
    transactions.expect_insert().returning(|_| Ok(Uuid::new_v4()));

    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_invoice()
        .withf(|_, amount, _, _, _, _| *amount == 0)
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(test_invoice()));

    let usecase = CheckoutUseCase::new(
        Arc::new(carts),
        Arc::new(products),
        Arc::new(orders),
        Arc::new(transactions),
        Arc::new(gateway),
    );

    let response = usecase
        .checkout(owner, "a@b.com".to_string(), PaymentMethod::CreditCard)
        .await
        .expect("zero-value checkout should succeed");

    assert_eq!(response.total_amount, 0);
}

// In-memory collaborators for the end-to-end checkout → webhook scenario.

fn owner_matches(line: &CartItemEntity, owner: &CartOwner) -> bool {
    match owner {
        CartOwner::User(user_id) => line.user_id == Some(*user_id),
        CartOwner::Session(session_id) => {
            line.session_id.as_deref() == Some(session_id.as_str())
        }
    }
}

#[derive(Default)]
struct InMemoryCart(Mutex<Vec<CartItemEntity>>);

#[async_trait]
impl CartRepository for InMemoryCart {
    async fn find_by_owner(&self, owner: &CartOwner) -> Result<Vec<CartItemEntity>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|line| owner_matches(line, owner))
            .cloned()
            .collect())
    }

    async fn find_line(
        &self,
        owner: &CartOwner,
        product_id: Uuid,
    ) -> Result<Option<CartItemEntity>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|line| owner_matches(line, owner) && line.product_id == product_id)
            .cloned())
    }

    async fn insert_line(&self, line: InsertCartItemEntity) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.0.lock().unwrap().push(CartItemEntity {
            id,
            user_id: line.user_id,
            session_id: line.session_id,
            product_id: line.product_id,
            quantity: line.quantity,
            price: line.price,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn set_quantity(&self, line_id: Uuid, quantity: i32) -> Result<()> {
        for line in self.0.lock().unwrap().iter_mut() {
            if line.id == line_id {
                line.quantity = quantity;
            }
        }
        Ok(())
    }

    async fn delete_line(&self, line_id: Uuid) -> Result<usize> {
        let mut lines = self.0.lock().unwrap();
        let before = lines.len();
        lines.retain(|line| line.id != line_id);
        Ok(before - lines.len())
    }

    async fn clear_owner(&self, owner: &CartOwner) -> Result<usize> {
        let mut lines = self.0.lock().unwrap();
        let before = lines.len();
        lines.retain(|line| !owner_matches(line, owner));
        Ok(before - lines.len())
    }
}

#[derive(Default)]
struct InMemoryProducts(Mutex<HashMap<Uuid, ProductEntity>>);

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<ProductEntity>> {
        Ok(self.0.lock().unwrap().get(&product_id).cloned())
    }

    async fn list(&self, _filter: ListProductsFilter) -> Result<Vec<ProductEntity>> {
        Ok(self.0.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, product: InsertProductEntity) -> Result<ProductEntity> {
        let entity = ProductEntity {
            id: Uuid::new_v4(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            images: product.images,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.0.lock().unwrap().insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.0.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
struct InMemoryOrders(Mutex<HashMap<Uuid, OrderEntity>>);

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn insert(&self, order: InsertOrderEntity) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.0.lock().unwrap().insert(
            id,
            OrderEntity {
                id,
                user_id: order.user_id,
                user_email: order.user_email,
                items: order.items,
                total_amount: order.total_amount,
                status: order.status,
                payment_method: order.payment_method,
                gateway_invoice_id: None,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        Ok(self.0.lock().unwrap().get(&order_id).cloned())
    }

    async fn list(
        &self,
        _user_id: Option<Uuid>,
        _limit: i64,
        _skip: i64,
    ) -> Result<Vec<OrderEntity>> {
        Ok(self.0.lock().unwrap().values().cloned().collect())
    }

    async fn set_gateway_invoice_id(&self, order_id: Uuid, invoice_id: String) -> Result<()> {
        if let Some(order) = self.0.lock().unwrap().get_mut(&order_id) {
            order.gateway_invoice_id = Some(invoice_id);
            order.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> Result<usize> {
        match self.0.lock().unwrap().get_mut(&order_id) {
            Some(order) => {
                order.status = status.to_string();
                order.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[derive(Default)]
struct InMemoryTransactions(Mutex<Vec<PaymentTransactionEntity>>);

#[async_trait]
impl PaymentTransactionRepository for InMemoryTransactions {
    async fn insert(&self, transaction: InsertPaymentTransactionEntity) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.0.lock().unwrap().push(PaymentTransactionEntity {
            id,
            order_id: transaction.order_id,
            user_id: transaction.user_id,
            amount: transaction.amount,
            currency: transaction.currency,
            status: transaction.status,
            payment_method: transaction.payment_method,
            gateway_invoice_id: transaction.gateway_invoice_id,
            gateway_payment_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        Ok(id)
    }

    async fn update_status_by_order_id(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        gateway_payment_id: Option<String>,
    ) -> Result<usize> {
        let mut transactions = self.0.lock().unwrap();
        let mut affected = 0;
        for transaction in transactions.iter_mut() {
            if transaction.order_id == order_id {
                transaction.status = status.to_string();
                transaction.gateway_payment_id = gateway_payment_id.clone();
                transaction.updated_at = Utc::now();
                affected += 1;
            }
        }
        Ok(affected)
    }
}

struct RecordingGateway {
    calls: Mutex<Vec<(String, i64)>>,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_invoice(
        &self,
        external_id: &str,
        amount: i64,
        _payer_email: &str,
        _description: &str,
        _currency: &str,
        _payment_methods: Vec<String>,
    ) -> AnyResult<CreatedInvoice> {
        self.calls
            .lock()
            .unwrap()
            .push((external_id.to_string(), amount));
        Ok(test_invoice())
    }
}

#[tokio::test]
async fn checkout_then_paid_webhook_completes_the_order() {
    const WEBHOOK_TOKEN: &str = "cb_token_for_tests";

    let owner = CartOwner::Session("sess-1".to_string());
    let other_owner = CartOwner::Session("sess-2".to_string());

    let products = Arc::new(InMemoryProducts::default());
    let product_a = products
        .insert(InsertProductEntity {
            name: "Premium Subscription (Monthly)".to_string(),
            description: "Monthly premium access".to_string(),
            price: 50,
            stock: 1000,
            category: "subscription".to_string(),
            images: serde_json::json!([]),
        })
        .await
        .unwrap();

    let carts = Arc::new(InMemoryCart::default());
    carts
        .insert_line(InsertCartItemEntity {
            user_id: None,
            session_id: Some("sess-1".to_string()),
            product_id: product_a.id,
            quantity: 2,
            price: 50,
        })
        .await
        .unwrap();
    carts
        .insert_line(InsertCartItemEntity {
            user_id: None,
            session_id: Some("sess-2".to_string()),
            product_id: product_a.id,
            quantity: 1,
            price: 50,
        })
        .await
        .unwrap();

    let orders = Arc::new(InMemoryOrders::default());
    let transactions = Arc::new(InMemoryTransactions::default());
    let gateway = Arc::new(RecordingGateway {
        calls: Mutex::new(Vec::new()),
    });

    let checkout = CheckoutUseCase::new(
        Arc::clone(&carts),
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::clone(&transactions),
        Arc::clone(&gateway),
    );

    let response = checkout
        .checkout(owner.clone(), "a@b.com".to_string(), PaymentMethod::CreditCard)
        .await
        .expect("checkout should succeed");

    assert_eq!(response.total_amount, 100);
    assert_eq!(
        gateway.calls.lock().unwrap().as_slice(),
        &[(format!("order_{}", response.order_id), 100)]
    );

    let order = orders
        .find_by_id(response.order_id)
        .await
        .unwrap()
        .expect("order should be persisted");
    assert_eq!(order.status, "pending");
    assert_eq!(order.gateway_invoice_id.as_deref(), Some("inv_test_1"));

    // Only the checkout owner's cart is cleared.
    assert!(carts.find_by_owner(&owner).await.unwrap().is_empty());
    assert_eq!(carts.find_by_owner(&other_owner).await.unwrap().len(), 1);

    let webhook = PaymentWebhookUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&transactions),
        WEBHOOK_TOKEN.to_string(),
    );
    let body = format!(
        r#"{{"external_id":"order_{}","status":"PAID","payment_id":"pay_42"}}"#,
        response.order_id
    );

    webhook
        .handle_notification(body.as_bytes(), Some(WEBHOOK_TOKEN))
        .await
        .expect("webhook should be accepted");

    let order = orders
        .find_by_id(response.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, "completed");

    {
        let transactions = transactions.0.lock().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].status, "completed");
        assert_eq!(transactions[0].gateway_payment_id.as_deref(), Some("pay_42"));
    }

    // Redelivery of the identical notification lands on the same state.
    webhook
        .handle_notification(body.as_bytes(), Some(WEBHOOK_TOKEN))
        .await
        .expect("redelivered webhook should be accepted");

    let order = orders
        .find_by_id(response.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, "completed");
}
