mod reply;
pub mod route;
mod state;

pub use reply::Reply;
pub use state::AppState;
