use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for moving an order through its workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateOrderStatusDto {
    /// Free-form status, e.g. "In Progress", "Completed", "Cancelled"
    pub status: String,
}

/// Request DTO for recording the payment outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderPaymentDto {
    #[serde(rename = "pagamento_aprovado")]
    pub payment_approved: bool,
}
