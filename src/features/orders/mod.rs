//! Order intake and workflow.
//!
//! Orders are immutable once placed except for their status and payment flag.
//! Placing an order requires the customer service to know the CPF.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/order` | Place an order |
//! | GET | `/order` | List orders |
//! | PATCH | `/order/update/{id}` | Change status |
//! | PATCH | `/order/payment/{id}` | Set payment approval |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::OrderService;
