pub mod board;
pub mod settings;
