use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine, OrderLineInput};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::product::{NewProduct, Product};

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// Process-local store implementing every repository port.
///
/// All three ports share one lock, so creating an order and taking its
/// quantities out of stock happen as a single step, like the Diesel
/// transaction does.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders persisted so far.
    pub fn order_count(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.orders.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
    }
}

impl CustomerRepository for InMemoryStore {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut tables = self.lock()?;
        if tables.customers.iter().any(|c| c.email == customer.email) {
            return Err(DomainError::EmailInUse);
        }
        let customer = Customer {
            id: Uuid::new_v4(),
            name: customer.name,
            email: customer.email,
            created_at: Utc::now(),
        };
        tables.customers.push(customer.clone());
        Ok(customer)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.lock()?.customers.iter().find(|c| c.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        Ok(self
            .lock()?
            .customers
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }
}

impl ProductRepository for InMemoryStore {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut tables = self.lock()?;
        if tables.products.iter().any(|p| p.name == product.name) {
            return Err(DomainError::ProductNameInUse);
        }
        let product = Product {
            id: Uuid::new_v4(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: Utc::now(),
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .lock()?
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
        Ok(self
            .lock()?
            .products
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }
}

impl OrderRepository for InMemoryStore {
    fn create(
        &self,
        customer: &Customer,
        lines: Vec<OrderLineInput>,
    ) -> Result<Order, DomainError> {
        let mut tables = self.lock()?;

        // Work on a copy of the stock so a failing line leaves nothing applied.
        let mut stock = tables.products.clone();
        for line in &lines {
            let product = stock
                .iter_mut()
                .find(|p| p.id == line.product_id)
                .ok_or(DomainError::ProductNotFound(line.product_id))?;
            if product.quantity < line.quantity {
                return Err(DomainError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                });
            }
            product.quantity -= line.quantity;
        }

        let order = Order {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            created_at: Utc::now(),
            lines: lines
                .into_iter()
                .map(|l| OrderLine {
                    id: Uuid::new_v4(),
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
        };
        tables.products = stock;
        tables.orders.push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.lock()?.orders.iter().find(|o| o.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;

    fn seed(store: &InMemoryStore) -> (Customer, Product) {
        let customer = CustomerRepository::create(
            store,
            NewCustomer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        )
        .expect("create customer failed");
        let product = ProductRepository::create(
            store,
            NewProduct {
                name: "Pen".to_string(),
                price: BigDecimal::from_str("1.50").expect("valid decimal"),
                quantity: 10,
            },
        )
        .expect("create product failed");
        (customer, product)
    }

    fn input(product_id: Uuid, quantity: i32) -> OrderLineInput {
        OrderLineInput {
            product_id,
            quantity,
            unit_price: BigDecimal::from_str("1.50").expect("valid decimal"),
        }
    }

    #[test]
    fn vanished_product_is_reported_as_not_found() {
        let store = InMemoryStore::new();
        let (customer, product) = seed(&store);
        let gone = Uuid::new_v4();

        let err = OrderRepository::create(
            &store,
            &customer,
            vec![input(product.id, 1), input(gone, 1)],
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::ProductNotFound(id) if id == gone));
        assert_eq!(store.find_all_by_id(&[product.id]).unwrap()[0].quantity, 10);
    }

    #[test]
    fn shortfall_is_reported_with_requested_quantity() {
        let store = InMemoryStore::new();
        let (customer, product) = seed(&store);

        let err = OrderRepository::create(&store, &customer, vec![input(product.id, 11)])
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::InsufficientStock { product_id, requested: 11 } if product_id == product.id
        ));
    }

    #[test]
    fn unique_email_and_product_name_are_enforced() {
        let store = InMemoryStore::new();
        seed(&store);

        let err = CustomerRepository::create(
            &store,
            NewCustomer {
                name: "Other".to_string(),
                email: "ada@example.com".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::EmailInUse));

        let err = ProductRepository::create(
            &store,
            NewProduct {
                name: "Pen".to_string(),
                price: BigDecimal::from(2),
                quantity: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::ProductNameInUse));
    }
}
