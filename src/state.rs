use std::sync::Arc;

use crate::application::customer_service::CustomerService;
use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::db::DbPool;
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::infrastructure::{
    DieselCustomerRepository, DieselOrderRepository, DieselProductRepository, InMemoryStore,
};

pub type SharedCustomers = Arc<dyn CustomerRepository>;
pub type SharedProducts = Arc<dyn ProductRepository>;
pub type SharedOrders = Arc<dyn OrderRepository>;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService<SharedCustomers>,
    pub products: ProductService<SharedProducts>,
    pub orders: OrderService<SharedCustomers, SharedProducts, SharedOrders>,
}

impl AppState {
    pub fn new(customers: SharedCustomers, products: SharedProducts, orders: SharedOrders) -> Self {
        Self {
            customers: CustomerService::new(customers.clone()),
            products: ProductService::new(products.clone()),
            orders: OrderService::new(customers, products, orders),
        }
    }

    /// Wires every port to its PostgreSQL adapter over `pool`.
    pub fn with_pool(pool: DbPool) -> Self {
        Self::new(
            Arc::new(DieselCustomerRepository::new(pool.clone())),
            Arc::new(DieselProductRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool)),
        )
    }

    /// Wires every port to one shared [`InMemoryStore`].
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::new(store.clone(), store.clone(), store)
    }
}
