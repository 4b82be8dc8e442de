pub mod controller;
pub mod sse;
pub mod worker;

pub use controller::RigLink;
pub use sse::{SseDecoder, SseFrame};
