mod products;

pub use products::ProductClient;
