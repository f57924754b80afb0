//! OpenAPI documents, one per service binary.

use utoipa::OpenApi;

use crate::{orders, products, server, users};

#[derive(OpenApi)]
#[openapi(
    info(title = "User Service", version = "1.0.0"),
    paths(
        server::health,
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::update_user,
    ),
    components(schemas(users::User, users::NewUser, users::UserUpdate)),
    tags(
        (name = "Users", description = "User CRUD"),
        (name = "System", description = "Health and metrics")
    )
)]
pub struct UserApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(title = "Product Service", version = "1.0.0"),
    paths(
        server::health,
        products::handlers::list_products,
        products::handlers::get_product,
        products::handlers::create_product,
        products::handlers::update_product,
        products::handlers::delete_product,
    ),
    components(schemas(products::Product, products::NewProduct, products::ProductUpdate)),
    tags(
        (name = "Products", description = "Product CRUD and inventory"),
        (name = "System", description = "Health and metrics")
    )
)]
pub struct ProductApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(title = "Order Service", version = "1.0.0"),
    paths(
        server::health,
        orders::handlers::list_orders,
        orders::handlers::get_order,
        orders::handlers::create_order,
        orders::handlers::update_order_status,
    ),
    components(schemas(
        orders::Order,
        orders::OrderDetails,
        orders::NewOrder,
        orders::StatusUpdate
    )),
    tags(
        (name = "Orders", description = "Order workflow and queries"),
        (name = "System", description = "Health and metrics")
    )
)]
pub struct OrderApiDoc;
