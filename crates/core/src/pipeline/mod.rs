pub mod session_driver;
pub mod session_logger;
