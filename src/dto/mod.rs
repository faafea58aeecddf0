pub mod products;
pub mod reference;
pub mod stores;
