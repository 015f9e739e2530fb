pub mod db;
pub mod embeddings;
pub mod matches;
pub mod mentees;
pub mod mentors;
pub mod models;
pub mod recommendations;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
