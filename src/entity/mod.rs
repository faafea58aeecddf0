pub mod images;
pub mod products;
pub mod stores;

pub use images::Entity as Images;
pub use products::Entity as Products;
pub use stores::Entity as Stores;
