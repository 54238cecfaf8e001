pub mod account;
pub mod config;

pub use account::Entity as Account;
pub use account::Role;
pub use config::Entity as Config;
