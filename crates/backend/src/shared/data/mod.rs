pub mod sample_data;
pub mod store;
