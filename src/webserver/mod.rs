mod server;

pub mod routes;
pub mod state;
pub mod utils;

// Public API for starting the webserver
pub use server::{build_app, start_server};
pub use state::AppState;
