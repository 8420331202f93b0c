use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::repository::{OrderRepository, ProductRepository};
use crate::domain::types::{ORDER_STATUS_PENDING, Order, OrderDetail, OrderItem};
use crate::error::ApiError;

// ── PlaceOrder ───────────────────────────────────────────────────────────────

pub struct OrderItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

pub struct PlaceOrderUseCase<P: ProductRepository, O: OrderRepository> {
    pub products: P,
    pub orders: O,
}

impl<P: ProductRepository, O: OrderRepository> PlaceOrderUseCase<P, O> {
    /// Validate every referenced product up front, then create the order and
    /// its lines. A product price change or deletion between the validation
    /// read and the item insert is a known, unguarded race.
    pub async fn execute(
        &self,
        user_id: Uuid,
        items: Vec<OrderItemInput>,
    ) -> Result<Uuid, ApiError> {
        if items.is_empty() {
            return Err(ApiError::MissingData);
        }
        if items.iter().any(|i| i.quantity < 1) {
            return Err(ApiError::InvalidQuantity);
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in &items {
            let product = self
                .products
                .find_by_id(item.product_id)
                .await?
                .ok_or(ApiError::ProductNotFound(item.product_id))?;
            lines.push((product, item.quantity));
        }

        let total_amount = lines
            .iter()
            .fold(Decimal::ZERO, |acc, (product, quantity)| {
                acc + product.price * Decimal::from(*quantity)
            })
            .round_dp(2);

        let order = Order {
            id: Uuid::now_v7(),
            user_id,
            total_amount,
            status: ORDER_STATUS_PENDING.to_owned(),
            created_at: Utc::now(),
        };
        let order_items: Vec<OrderItem> = lines
            .into_iter()
            .map(|(product, quantity)| OrderItem {
                id: Uuid::now_v7(),
                order_id: order.id,
                product_id: product.id,
                quantity,
                price: product.price,
            })
            .collect();

        self.orders.create_with_items(&order, &order_items).await?;
        Ok(order.id)
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<OrderDetail>, ApiError> {
        self.orders.list_by_user(user_id).await
    }
}

// ── CancelOrder ──────────────────────────────────────────────────────────────

pub struct CancelOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> CancelOrderUseCase<O> {
    /// The lookup is scoped to the caller, so another user's order is
    /// indistinguishable from a missing one.
    pub async fn execute(&self, user_id: Uuid, order_id: Uuid) -> Result<(), ApiError> {
        self.orders
            .find_for_user(order_id, user_id)
            .await?
            .ok_or(ApiError::OrderNotFound)?;
        self.orders.delete_with_items(order_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::types::{OrderItemDetail, Product, ProductPatch};

    struct MockProductRepo {
        products: Vec<Product>,
    }

    impl ProductRepository for MockProductRepo {
        async fn list(&self) -> Result<Vec<Product>, ApiError> {
            Ok(self.products.clone())
        }
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
            Ok(self.products.iter().find(|p| p.id == id).cloned())
        }
        async fn create(&self, _product: &Product) -> Result<(), ApiError> {
            unimplemented!("not used by order tests")
        }
        async fn update(&self, _id: Uuid, _patch: &ProductPatch) -> Result<Product, ApiError> {
            unimplemented!("not used by order tests")
        }
        async fn delete(&self, _id: Uuid) -> Result<(), ApiError> {
            unimplemented!("not used by order tests")
        }
    }

    #[derive(Default)]
    struct MockOrderRepo {
        orders: Mutex<Vec<Order>>,
        items: Mutex<Vec<OrderItem>>,
    }

    impl OrderRepository for MockOrderRepo {
        async fn create_with_items(
            &self,
            order: &Order,
            items: &[OrderItem],
        ) -> Result<(), ApiError> {
            self.orders.lock().unwrap().push(order.clone());
            self.items.lock().unwrap().extend_from_slice(items);
            Ok(())
        }
        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderDetail>, ApiError> {
            let mut orders: Vec<Order> = self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let items = self.items.lock().unwrap();
            Ok(orders
                .into_iter()
                .map(|order| {
                    let lines = items
                        .iter()
                        .filter(|i| i.order_id == order.id)
                        .map(|i| OrderItemDetail {
                            item: i.clone(),
                            product: None,
                        })
                        .collect();
                    OrderDetail {
                        order,
                        items: lines,
                    }
                })
                .collect())
        }
        async fn find_for_user(
            &self,
            order_id: Uuid,
            user_id: Uuid,
        ) -> Result<Option<Order>, ApiError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id == order_id && o.user_id == user_id)
                .cloned())
        }
        async fn delete_with_items(&self, order_id: Uuid) -> Result<(), ApiError> {
            self.items.lock().unwrap().retain(|i| i.order_id != order_id);
            self.orders.lock().unwrap().retain(|o| o.id != order_id);
            Ok(())
        }
    }

    fn product(price: Decimal) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::now_v7(),
            name: "widget".into(),
            description: None,
            price,
            stock: 10,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn should_compute_total_from_current_prices() {
        let p = product(Decimal::new(999, 2)); // 9.99
        let product_id = p.id;
        let usecase = PlaceOrderUseCase {
            products: MockProductRepo { products: vec![p] },
            orders: MockOrderRepo::default(),
        };
        let user_id = Uuid::now_v7();
        usecase
            .execute(
                user_id,
                vec![OrderItemInput {
                    product_id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();

        let orders = usecase.orders.orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total_amount.to_string(), "19.98");
        assert_eq!(orders[0].status, "pending");
        assert_eq!(orders[0].user_id, user_id);

        let items = usecase.orders.items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price.to_string(), "9.99");
    }

    #[tokio::test]
    async fn should_snapshot_price_per_line() {
        let cheap = product(Decimal::new(150, 2)); // 1.50
        let dear = product(Decimal::new(2000, 2)); // 20.00
        let (cheap_id, dear_id) = (cheap.id, dear.id);
        let usecase = PlaceOrderUseCase {
            products: MockProductRepo {
                products: vec![cheap, dear],
            },
            orders: MockOrderRepo::default(),
        };
        usecase
            .execute(
                Uuid::now_v7(),
                vec![
                    OrderItemInput {
                        product_id: cheap_id,
                        quantity: 3,
                    },
                    OrderItemInput {
                        product_id: dear_id,
                        quantity: 1,
                    },
                ],
            )
            .await
            .unwrap();

        let orders = usecase.orders.orders.lock().unwrap();
        assert_eq!(orders[0].total_amount.to_string(), "24.50");
        let items = usecase.orders.items.lock().unwrap();
        let cheap_line = items.iter().find(|i| i.product_id == cheap_id).unwrap();
        assert_eq!(cheap_line.price.to_string(), "1.50");
    }

    #[tokio::test]
    async fn should_abort_whole_order_when_any_product_is_missing() {
        let p = product(Decimal::new(999, 2));
        let product_id = p.id;
        let missing_id = Uuid::now_v7();
        let usecase = PlaceOrderUseCase {
            products: MockProductRepo { products: vec![p] },
            orders: MockOrderRepo::default(),
        };
        let result = usecase
            .execute(
                Uuid::now_v7(),
                vec![
                    OrderItemInput {
                        product_id,
                        quantity: 1,
                    },
                    OrderItemInput {
                        product_id: missing_id,
                        quantity: 1,
                    },
                ],
            )
            .await;

        assert!(matches!(result, Err(ApiError::ProductNotFound(id)) if id == missing_id));
        assert!(usecase.orders.orders.lock().unwrap().is_empty());
        assert!(usecase.orders.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_empty_item_list() {
        let usecase = PlaceOrderUseCase {
            products: MockProductRepo { products: vec![] },
            orders: MockOrderRepo::default(),
        };
        let result = usecase.execute(Uuid::now_v7(), vec![]).await;
        assert!(matches!(result, Err(ApiError::MissingData)));
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity() {
        let p = product(Decimal::new(999, 2));
        let product_id = p.id;
        let usecase = PlaceOrderUseCase {
            products: MockProductRepo { products: vec![p] },
            orders: MockOrderRepo::default(),
        };
        let result = usecase
            .execute(
                Uuid::now_v7(),
                vec![OrderItemInput {
                    product_id,
                    quantity: 0,
                }],
            )
            .await;
        assert!(matches!(result, Err(ApiError::InvalidQuantity)));
    }

    #[tokio::test]
    async fn should_cancel_own_order_and_delete_items() {
        let repo = MockOrderRepo::default();
        let user_id = Uuid::now_v7();
        let order = Order {
            id: Uuid::now_v7(),
            user_id,
            total_amount: Decimal::new(100, 2),
            status: "pending".into(),
            created_at: Utc::now(),
        };
        let order_id = order.id;
        let item = OrderItem {
            id: Uuid::now_v7(),
            order_id,
            product_id: Uuid::now_v7(),
            quantity: 1,
            price: Decimal::new(100, 2),
        };
        repo.create_with_items(&order, std::slice::from_ref(&item))
            .await
            .unwrap();

        let usecase = CancelOrderUseCase { orders: repo };
        usecase.execute(user_id, order_id).await.unwrap();
        assert!(usecase.orders.orders.lock().unwrap().is_empty());
        assert!(usecase.orders.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_not_cancel_another_users_order() {
        let repo = MockOrderRepo::default();
        let owner = Uuid::now_v7();
        let order = Order {
            id: Uuid::now_v7(),
            user_id: owner,
            total_amount: Decimal::new(100, 2),
            status: "pending".into(),
            created_at: Utc::now(),
        };
        let order_id = order.id;
        repo.create_with_items(&order, &[]).await.unwrap();

        let usecase = CancelOrderUseCase { orders: repo };
        let result = usecase.execute(Uuid::now_v7(), order_id).await;
        assert!(matches!(result, Err(ApiError::OrderNotFound)));
        assert_eq!(usecase.orders.orders.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_list_orders_newest_first() {
        let repo = MockOrderRepo::default();
        let user_id = Uuid::now_v7();
        for total in [1i64, 2, 3] {
            let order = Order {
                id: Uuid::now_v7(),
                user_id,
                total_amount: Decimal::new(total * 100, 2),
                status: "pending".into(),
                created_at: Utc::now() + chrono::Duration::seconds(total),
            };
            repo.create_with_items(&order, &[]).await.unwrap();
        }
        let usecase = ListOrdersUseCase { orders: repo };
        let details = usecase.execute(user_id).await.unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].order.total_amount.to_string(), "3.00");
        assert_eq!(details[2].order.total_amount.to_string(), "1.00");
    }
}
