pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod order;
pub mod product;
pub mod user;

mod router;
pub use router::get_router;
