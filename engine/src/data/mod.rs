pub mod csv_parser;
pub mod market_data;
