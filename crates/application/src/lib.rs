//! nexns application layer: ports and the dataset loading use cases.
pub mod ports;
pub mod services;
pub mod use_cases;
