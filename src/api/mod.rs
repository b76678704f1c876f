// API Module - JSON API over the deadline monitor

pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{ApiServer, router};
pub use state::AppState;
