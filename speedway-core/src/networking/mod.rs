mod connection;
mod packets;
mod peers;

pub use packets::*;
pub use peers::*;

pub type ClientConnection = connection::Connection<WirePacket, WirePacket>;
pub type ServerConnection = connection::Connection<WirePacket, WirePacket>;

#[cfg(test)]
mod tests;
