pub mod category_repository;
pub mod db;
pub mod expense_repository;
pub mod user_repository;

pub use db::DbConnection;
