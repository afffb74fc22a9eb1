use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customers::create_customer,
        handlers::products::create_product,
        handlers::orders::create_order,
        handlers::orders::get_order,
    ),
    tags(
        (name = "customers", description = "Customer registration"),
        (name = "products", description = "Product catalogue and stock"),
        (name = "orders", description = "Order creation and lookup"),
    )
)]
pub struct ApiDoc;
