use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLineInput, OrderLineRequest};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};

#[derive(Clone)]
pub struct OrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> OrderService<C, P, O>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// Validates an order request and persists it.
    ///
    /// Replaying the same request creates a second, distinct order.
    pub fn create_order(
        &self,
        customer_id: Uuid,
        lines: &[OrderLineRequest],
    ) -> Result<Order, DomainError> {
        let (customer, lines) = self.prepare_order(customer_id, lines)?;
        let order = self.orders.create(&customer, lines)?;
        log::info!(
            "Created order {} for customer {} with {} line(s)",
            order.id,
            customer.id,
            order.lines.len()
        );
        Ok(order)
    }

    /// Runs every precondition for creating an order, stopping at the first
    /// failure. On success returns the customer and the request lines priced
    /// from the current catalogue, in request order.
    pub fn prepare_order(
        &self,
        customer_id: Uuid,
        lines: &[OrderLineRequest],
    ) -> Result<(Customer, Vec<OrderLineInput>), DomainError> {
        if lines.is_empty() {
            return Err(DomainError::InvalidInput(
                "an order needs at least one product".to_string(),
            ));
        }
        if let Some(line) = lines.iter().find(|l| l.quantity <= 0) {
            return Err(DomainError::InvalidInput(format!(
                "quantity for product {} must be positive",
                line.product_id
            )));
        }

        let customer = self
            .customers
            .find_by_id(customer_id)?
            .ok_or(DomainError::CustomerNotFound)?;

        let requested_ids: Vec<Uuid> = lines.iter().map(|l| l.product_id).collect();
        let found = self.products.find_all_by_id(&requested_ids)?;
        if found.is_empty() {
            log::warn!("Order for customer {} references no known product", customer_id);
            return Err(DomainError::NoProductsFound);
        }

        let found: HashMap<Uuid, _> = found.into_iter().map(|p| (p.id, p)).collect();

        if let Some(unknown) = lines.iter().find(|l| !found.contains_key(&l.product_id)) {
            log::warn!(
                "Order for customer {} references unknown product {}",
                customer_id,
                unknown.product_id
            );
            return Err(DomainError::ProductNotFound(unknown.product_id));
        }

        // Lines are checked one by one; repeated product ids are not summed.
        if let Some(short) = lines
            .iter()
            .find(|l| found[&l.product_id].quantity < l.quantity)
        {
            return Err(DomainError::InsufficientStock {
                product_id: short.product_id,
                requested: short.quantity,
            });
        }

        let priced = lines
            .iter()
            .map(|l| OrderLineInput {
                product_id: l.product_id,
                quantity: l.quantity,
                unit_price: found[&l.product_id].price.clone(),
            })
            .collect();

        Ok((customer, priced))
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.orders.find_by_id(id)
    }
}
