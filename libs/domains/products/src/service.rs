//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product operations on top of a [`ProductRepository`].
///
/// Existence is always checked before a mutation, so no operation reports
/// success for a product that does not exist.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.insert(input).await
    }

    /// Replace name, price and availability of an existing product.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository
            .update_by_id(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Negate the stored availability. Applying it twice restores the original.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        let existing = self.get_product(id).await?;

        let product = self
            .repository
            .update_by_id(id, existing.toggled())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        tracing::debug!(availability = product.availability, "Toggled availability");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        if !self.repository.delete_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}
