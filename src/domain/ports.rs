use std::sync::Arc;

use uuid::Uuid;

use super::customer::{Customer, NewCustomer};
use super::errors::DomainError;
use super::order::{Order, OrderLineInput};
use super::product::{NewProduct, Product};

pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError>;
    /// Batched lookup. Ids with no matching product are left out of the
    /// result; callers diff against what they asked for.
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;
    fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Persists the order and takes its quantities out of stock atomically.
    fn create(&self, customer: &Customer, lines: Vec<OrderLineInput>)
        -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
}

impl<T: CustomerRepository + ?Sized> CustomerRepository for Arc<T> {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        (**self).create(customer)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        (**self).find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        (**self).find_by_email(email)
    }
}

impl<T: ProductRepository + ?Sized> ProductRepository for Arc<T> {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        (**self).create(product)
    }

    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        (**self).find_all_by_id(ids)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
        (**self).find_by_name(name)
    }
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn create(
        &self,
        customer: &Customer,
        lines: Vec<OrderLineInput>,
    ) -> Result<Order, DomainError> {
        (**self).create(customer, lines)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }
}
