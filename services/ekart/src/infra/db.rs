use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use ekart_schema::{order_items, orders, products, users};

use crate::domain::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::domain::types::{
    Order, OrderDetail, OrderItem, OrderItemDetail, Product, ProductPatch, User,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let models = products::Entity::find()
            .all(&self.db)
            .await
            .context("list products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn create(&self, product: &Product) -> Result<(), ApiError> {
        products::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            stock: Set(product.stock),
            image_url: Set(product.image_url.clone()),
            created_at: Set(product.created_at),
            updated_at: Set(product.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Product, ApiError> {
        let mut am = products::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(ref description) = patch.description {
            am.description = Set(Some(description.clone()));
        }
        if let Some(price) = patch.price {
            am.price = Set(price);
        }
        if let Some(stock) = patch.stock {
            am.stock = Set(stock);
        }
        if let Some(ref image_url) = patch.image_url {
            am.image_url = Set(Some(image_url.clone()));
        }
        am.updated_at = Set(Utc::now());
        let model = am.update(&self.db).await.context("update product")?;
        Ok(product_from_model(model))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(())
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        stock: model.stock,
        image_url: model.image_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn create_with_items(
        &self,
        order: &Order,
        items: &[OrderItem],
    ) -> Result<(), ApiError> {
        orders::ActiveModel {
            id: Set(order.id),
            user_id: Set(order.user_id),
            total_amount: Set(order.total_amount),
            status: Set(order.status.clone()),
            created_at: Set(order.created_at),
        }
        .insert(&self.db)
        .await
        .context("create order")?;

        let item_models = items.iter().map(|item| order_items::ActiveModel {
            id: Set(item.id),
            order_id: Set(item.order_id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            price: Set(item.price),
        });
        order_items::Entity::insert_many(item_models)
            .exec(&self.db)
            .await
            .context("create order items")?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderDetail>, ApiError> {
        let rows = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .find_with_related(order_items::Entity)
            .all(&self.db)
            .await
            .context("list orders with items")?;

        // Product details via one explicit follow-up query instead of a
        // three-way join.
        let product_ids: Vec<Uuid> = rows
            .iter()
            .flat_map(|(_, items)| items.iter().map(|i| i.product_id))
            .collect();
        let product_models = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.db)
            .await
            .context("load products for order items")?;
        let by_id: HashMap<Uuid, Product> = product_models
            .into_iter()
            .map(|m| (m.id, product_from_model(m)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(order, items)| OrderDetail {
                order: order_from_model(order),
                items: items
                    .into_iter()
                    .map(|item| OrderItemDetail {
                        product: by_id.get(&item.product_id).cloned(),
                        item: order_item_from_model(item),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn find_for_user(
        &self,
        order_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Order>, ApiError> {
        let model = orders::Entity::find_by_id(order_id)
            .filter(orders::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find order for user")?;
        Ok(model.map(order_from_model))
    }

    async fn delete_with_items(&self, order_id: Uuid) -> Result<(), ApiError> {
        order_items::Entity::delete_many()
            .filter(order_items::Column::OrderId.eq(order_id))
            .exec(&self.db)
            .await
            .context("delete order items")?;
        orders::Entity::delete_by_id(order_id)
            .exec(&self.db)
            .await
            .context("delete order")?;
        Ok(())
    }
}

fn order_from_model(model: orders::Model) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        total_amount: model.total_amount,
        status: model.status,
        created_at: model.created_at,
    }
}

fn order_item_from_model(model: order_items::Model) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price: model.price,
    }
}
