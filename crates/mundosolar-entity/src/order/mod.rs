//! Order, order item, and payment ledger entities.

pub mod ledger;
pub mod model;
pub mod payment;
pub mod status;

pub use ledger::LedgerTotals;
pub use model::{CreateOrder, NewOrderItem, Order, OrderItem};
pub use payment::{NewPayment, Payment, PaymentMethod};
pub use status::{OrderStatus, PaymentStatus};
