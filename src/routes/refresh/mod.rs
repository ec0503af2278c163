mod handler;
mod model;

pub use handler::refresh_items;
pub use model::{RefreshRequest, RefreshResponse, RefreshStatus};
