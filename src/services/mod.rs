pub mod authz;
pub mod product_service;
pub mod reference_service;
pub mod store_service;
