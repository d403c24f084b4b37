pub mod board_wheel;
pub mod date_scroll;
pub mod exporter;
