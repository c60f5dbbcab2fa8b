pub mod events;
pub mod masks;
pub mod monitors;
