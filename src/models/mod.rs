mod account;
mod instance;

pub use account::Account;
pub use instance::{Instance, InstanceParseError};
