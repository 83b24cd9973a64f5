pub mod classes;
pub mod core;
pub mod session;
pub mod students;
