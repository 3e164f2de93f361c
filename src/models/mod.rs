pub mod order;

pub use order::{Hotdog, HotdogType, Order, OrderStatus, PaymentType};
