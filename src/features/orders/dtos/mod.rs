mod order_dto;

pub use order_dto::{UpdateOrderPaymentDto, UpdateOrderStatusDto};
