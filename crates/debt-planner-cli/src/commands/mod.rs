pub mod engine;
pub mod projection;
