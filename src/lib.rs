pub use self::config::Highlights;
pub use self::highlight::{Engine, Outcome, Settings};
pub use self::message::{Badge, Message};

pub mod color;
pub mod config;
pub mod highlight;
pub mod message;
