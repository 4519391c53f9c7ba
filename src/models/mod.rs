pub mod activity;
pub mod product;
pub mod profile;
pub mod user;
