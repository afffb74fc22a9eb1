use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Could not find any customer with the given id")]
    CustomerNotFound,
    #[error("Could not find any products with the given id")]
    NoProductsFound,
    #[error("Could not find product {0}")]
    ProductNotFound(Uuid),
    #[error("The quantity {requested} is not available for {product_id}")]
    InsufficientStock { product_id: Uuid, requested: i32 },
    #[error("This email is already in use")]
    EmailInUse,
    #[error("There is already a product with this name")]
    ProductNameInUse,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_reports_requested_quantity() {
        let product_id = Uuid::nil();
        let err = DomainError::InsufficientStock {
            product_id,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            format!("The quantity 5 is not available for {}", product_id)
        );
    }

    #[test]
    fn product_not_found_names_the_product() {
        let product_id = Uuid::new_v4();
        assert!(DomainError::ProductNotFound(product_id)
            .to_string()
            .contains(&product_id.to_string()));
    }
}
