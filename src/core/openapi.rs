use utoipa::{Modify, OpenApi};

use crate::features::orders::{dtos as orders_dtos, handlers as orders_handlers, models as orders_models};
use crate::features::products::{handlers as products_handlers, models as products_models};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Products
        products_handlers::create_product,
        products_handlers::list_products,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Orders
        orders_handlers::create_order,
        orders_handlers::list_orders,
        orders_handlers::update_order_status,
        orders_handlers::update_order_payment,
    ),
    components(
        schemas(
            products_models::Product,
            orders_models::Order,
            orders_models::OrderLine,
            orders_dtos::UpdateOrderStatusDto,
            orders_dtos::UpdateOrderPaymentDto,
        )
    ),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Order intake and workflow"),
    ),
    info(
        title = "Order Service API",
        version = "0.1.0",
        description = "Products and orders of the restaurant ordering system",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
