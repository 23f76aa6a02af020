pub mod customer;
pub mod order;
pub mod product;
pub mod representative;
pub mod user_role;

pub use customer::Customer;
pub use order::{Order, OrderRow};
pub use product::{ProductWithSizes, SizeQuantity};
pub use representative::Representative;
pub use user_role::UserRole;
