pub mod payload;
pub mod table;
