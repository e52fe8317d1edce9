pub mod auth;
pub mod booking;
pub mod export;
pub mod feed;
pub mod health;
pub mod host;
pub mod slot;
