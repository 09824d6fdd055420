//! Plain data shared by the session engine, the generator and the bus.

pub mod engine;
pub mod level;
pub mod settings;
pub mod stats;
