pub mod calendar;
pub mod importing;
pub mod server;
