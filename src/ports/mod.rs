pub mod authority;
pub mod database;
