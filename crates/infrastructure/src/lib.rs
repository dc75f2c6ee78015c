pub mod controller;
pub mod dns;
