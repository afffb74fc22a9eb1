use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product};

/// Prices are stored as `NUMERIC(10, 2)`.
const PRICE_SCALE: i64 = 2;
const PRICE_LIMIT: i64 = 100_000_000;

#[derive(Clone)]
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_product(
        &self,
        name: &str,
        price: BigDecimal,
        quantity: i32,
    ) -> Result<Product, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("name is required".to_string()));
        }
        if price < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput(
                "price must not be negative".to_string(),
            ));
        }
        if price.with_scale(PRICE_SCALE) != price {
            return Err(DomainError::InvalidInput(format!(
                "price must have at most {} decimal places",
                PRICE_SCALE
            )));
        }
        if price >= BigDecimal::from(PRICE_LIMIT) {
            return Err(DomainError::InvalidInput(format!(
                "price must be below {}",
                PRICE_LIMIT
            )));
        }
        if quantity < 0 {
            return Err(DomainError::InvalidInput(
                "quantity must not be negative".to_string(),
            ));
        }

        if self.repo.find_by_name(name)?.is_some() {
            return Err(DomainError::ProductNameInUse);
        }

        let product = self.repo.create(NewProduct {
            name: name.to_string(),
            price,
            quantity,
        })?;
        log::info!("Created product {} with {} in stock", product.id, product.quantity);
        Ok(product)
    }
}
