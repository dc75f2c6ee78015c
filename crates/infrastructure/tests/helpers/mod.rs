#![allow(dead_code)]

pub mod builders;
pub mod mock_controller;

pub use builders::*;
pub use mock_controller::*;
