pub mod activity_cmd;
pub mod auth_cmd;
pub mod caja_cmd;
pub mod category_cmd;
pub mod product_cmd;
pub mod profile_cmd;
