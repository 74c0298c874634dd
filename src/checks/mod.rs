pub mod checker;
pub mod consistency;
pub mod objective;
