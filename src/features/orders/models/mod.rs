mod order;

pub use order::{Order, OrderLine, OrderRow};
