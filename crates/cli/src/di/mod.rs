mod controller;
mod dns;
mod use_cases;

pub use controller::Controller;
pub use dns::DnsServices;
pub use use_cases::UseCases;
