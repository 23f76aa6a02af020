pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod representatives;
pub mod user_roles;
