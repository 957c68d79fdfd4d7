pub mod discovery;
pub mod network;
pub mod scanner;
