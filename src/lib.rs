pub mod body_reader;
pub mod config;
pub mod error;
pub mod handler;
pub mod path_resolver;
pub mod request;
pub mod response;
pub mod store;

pub use config::Config;
pub use error::{BodyError, HandlerError, PathError, StoreError};
pub use handler::Handler;
pub use request::CgiRequest;
pub use response::Response;
