pub mod command;
pub mod console;


pub use console::{spawn_input_reader, Console};
