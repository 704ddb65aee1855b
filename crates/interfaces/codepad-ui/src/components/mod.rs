pub mod forms;
pub mod header;
pub mod notice;
