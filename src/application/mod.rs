pub mod services;

pub use services::AccountService;
