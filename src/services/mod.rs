//! Supporting services.

pub mod sample_data;
