use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Catalog item
///
/// Missing JSON fields decode to zero values, which the validation rules
/// below then reject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(default)]
pub struct Product {
    pub id: i32,

    #[serde(rename = "categoria_id")]
    #[validate(custom(function = "validate_non_zero_i32"))]
    pub category_id: i32,

    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(rename = "descricao")]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    // Zero is treated as "unset", so free products are rejected too
    #[serde(rename = "preco")]
    #[validate(custom(function = "validate_non_zero_price"))]
    pub price: f64,

    #[serde(rename = "tempo_de_preparo")]
    #[validate(custom(function = "validate_non_zero_i32"))]
    pub prep_time_minutes: i32,
}

fn validate_non_zero_i32(value: i32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::new("non_zero"));
    }
    Ok(())
}

fn validate_non_zero_price(value: f64) -> Result<(), ValidationError> {
    if value == 0.0 {
        return Err(ValidationError::new("non_zero"));
    }
    Ok(())
}
