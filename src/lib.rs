use config::Config;
use indexer::Refresher;

pub mod cache;
pub mod config;
pub mod constants;
pub mod indexer;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub refresher: Refresher,
}
