// Panel models: what the front end renders

mod display;
mod network;

pub use display::{DisplayState, NO_PLAYER_LABEL, clamp_fraction, clamp_percent};
pub use network::{MIB, NetCounters, NetworkThroughput};
