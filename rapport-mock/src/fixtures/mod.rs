pub mod countries;
pub mod products;
pub mod rates;
