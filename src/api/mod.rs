pub mod error;
pub mod routes;

pub use error::ErrorBody;
pub use routes::router;
