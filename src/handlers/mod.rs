pub mod auth;
pub mod cars;
pub mod clients;
pub mod health;
pub mod reports;
pub mod sales;
pub mod sellers;
