pub mod admission;
pub mod ports;
pub mod use_cases;
