pub mod input_adapter;
