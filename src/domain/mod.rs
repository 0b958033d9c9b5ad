pub mod account;
pub mod customer;

pub use account::*;
pub use customer::*;
