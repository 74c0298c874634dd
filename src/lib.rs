pub mod checks;
pub mod generator;
pub mod instance;
pub mod io;
