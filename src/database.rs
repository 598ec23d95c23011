pub mod connection;
pub mod dto;
pub mod repository;

pub use connection::{backup_database, close_connection, establish_connection, init_database};
