pub mod capacity;
pub mod course;
pub mod error;
pub mod ports;
