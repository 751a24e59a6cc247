pub mod handlers;
pub mod middleware;
pub mod pokemon;
pub mod routes;
pub mod seed;

pub use routes::create_router;
