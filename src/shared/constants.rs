/// Status every new order starts in
pub const ORDER_STATUS_RECEIVED: &str = "Received";

/// Body returned for malformed ids and request bodies
pub const BAD_REQUEST_MESSAGE: &str = "400 bad request";

// =============================================================================
// ORDER MESSAGES
// =============================================================================

pub const ORDER_CREATE_FAILED: &str = "Error creating order";
pub const ORDER_LIST_FAILED: &str = "Error listing orders";
pub const ORDER_UPDATED: &str = "Order updated";
pub const ORDER_UPDATE_FAILED: &str = "Error updating order";
pub const ORDER_PAYMENT_UPDATED: &str = "Order payment updated";
pub const ORDER_PAYMENT_UPDATE_FAILED: &str = "Error updating order payment";
pub const CUSTOMER_SERVICE_UNAVAILABLE: &str = "502 customer service unavailable";

// =============================================================================
// PRODUCT MESSAGES
// =============================================================================

pub const PRODUCT_INSERTED: &str = "Product inserted";
pub const PRODUCT_INSERT_FAILED: &str = "500 error inserting product";
pub const PRODUCT_UPDATE_FAILED: &str = "500 error updating product";
pub const PRODUCT_DELETE_FAILED: &str = "500 error deleting product";
