pub mod extract;
pub mod frame;
pub mod preprocess;
pub mod session;
