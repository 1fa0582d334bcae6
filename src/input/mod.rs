mod command;
mod handler;

pub use handler::handle_line;
