pub mod log_adapter;
