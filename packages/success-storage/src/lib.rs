pub mod assistant;
pub mod db;
pub mod links;
pub mod logs;
pub mod models;
pub mod people;
pub mod projects;
pub mod schema;
pub mod search_index;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
