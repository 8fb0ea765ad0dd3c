//! Stats link between the sampling agent and the display: one JSON object
//! per line over a Unix socket.

pub mod client;
pub mod message;

pub use client::{StatsListener, StatsSender};
pub use message::{encode_line, parse_line, StatsMessage};
