pub mod errors;
pub mod limits;
pub mod order;
pub mod ports;
pub mod product;
pub mod storefront;
