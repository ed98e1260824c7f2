//! Display drivers

pub mod cfa633;

pub use cfa633::Cfa633;
