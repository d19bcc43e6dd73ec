pub mod aggregate;
pub mod grid;
pub mod table;
pub mod token;
