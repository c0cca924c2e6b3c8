use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Store gateway for products.
///
/// Absence is reported as `None`/`false`, never as an error; `Err` always means
/// the store itself failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ascending by id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert with `availability = true`; the store assigns the id
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Replace name, price and availability; `None` if the row is gone
    async fn update_by_id(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// `true` if a row was removed
    async fn delete_by_id(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

/// Process-local store, used by tests and for running without PostgreSQL.
///
/// Ids increase monotonically and are never reused after a delete.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; later inserts continue after the highest seeded id.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let rows: BTreeMap<i32, Product> = products.into_iter().map(|p| (p.id, p)).collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0);
        Self {
            table: RwLock::new(Table { rows, last_id }),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Database("product id space exhausted".to_string()))?;
        table.last_id = id;

        let product = Product {
            id,
            name: input.name,
            price: input.price,
            availability: true,
        };
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update_by_id(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|product| {
            product.apply_update(input);
            product.clone()
        }))
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
