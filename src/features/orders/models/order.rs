use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A placed order
///
/// Lines are fixed at creation; afterwards only `status` and
/// `payment_approved` change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Order {
    pub id: i32,

    /// Customer CPF, checked against the customer service on creation
    pub cpf: i64,

    #[serde(rename = "produtos", deserialize_with = "null_as_default")]
    pub lines: Vec<OrderLine>,

    #[serde(deserialize_with = "null_as_default")]
    pub status: String,

    #[serde(rename = "metodo_de_pagamento", deserialize_with = "null_as_default")]
    pub payment_method: String,

    #[serde(rename = "pagamento_aprovado")]
    pub payment_approved: bool,
}

/// One product-quantity-note triple of an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct OrderLine {
    #[serde(rename = "produto_id")]
    pub product_id: i32,

    #[serde(rename = "quantidade")]
    pub quantity: i32,

    #[serde(rename = "observacao", deserialize_with = "null_as_default")]
    pub observation: String,
}

/// Flat row of the orders x order_products join
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i32,
    pub customer_cpf: Option<i64>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub payment_approved: Option<bool>,
    pub product_id: i32,
    pub quantity: i32,
    pub observation: Option<String>,
}

impl OrderRow {
    pub fn line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product_id,
            quantity: self.quantity,
            observation: self.observation.clone().unwrap_or_default(),
        }
    }
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        let line = row.line();
        Self {
            id: row.id,
            cpf: row.customer_cpf.unwrap_or_default(),
            lines: vec![line],
            status: row.status.unwrap_or_default(),
            payment_method: row.payment_method.unwrap_or_default(),
            payment_approved: row.payment_approved.unwrap_or_default(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_decoding() {
        let order: Order =
            serde_json::from_str(r#"{"cpf":12345,"status":"Pending","metodo_pagamento":"card"}"#)
                .unwrap();

        assert_eq!(order.cpf, 12345);
        assert_eq!(order.status, "Pending");
        assert_eq!(order.payment_method, "");
        assert!(order.lines.is_empty());
        assert!(!order.payment_approved);
    }

    #[test]
    fn test_null_lines_and_observation() {
        let order: Order = serde_json::from_str(
            r#"{"cpf":1,"produtos":[{"produto_id":3,"quantidade":2,"observacao":null}],"metodo_de_pagamento":null}"#,
        )
        .unwrap();
        assert_eq!(
            order.lines,
            vec![OrderLine {
                product_id: 3,
                quantity: 2,
                observation: String::new(),
            }]
        );

        let order: Order = serde_json::from_str(r#"{"cpf":1,"produtos":null}"#).unwrap();
        assert!(order.lines.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let order = Order {
            id: 7,
            cpf: 98765432100,
            lines: vec![OrderLine {
                product_id: 1,
                quantity: 2,
                observation: "no onions".to_string(),
            }],
            status: "Received".to_string(),
            payment_method: "pix".to_string(),
            payment_approved: true,
        };

        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            serde_json::json!({
                "id": 7,
                "cpf": 98765432100_i64,
                "produtos": [{"produto_id": 1, "quantidade": 2, "observacao": "no onions"}],
                "status": "Received",
                "metodo_de_pagamento": "pix",
                "pagamento_aprovado": true
            })
        );
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        assert!(serde_json::from_str::<Order>(r#"{"cpf":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Order>("{invalid-json}").is_err());
    }
}
