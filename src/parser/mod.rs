pub mod car_info_parser;

pub use car_info_parser::load_reference_table;
