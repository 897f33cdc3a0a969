//! Request-level flows combining the market-data client, scorer and storage.

pub mod compare;
pub mod news;
pub mod portfolio;
