use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use super::Packet;

// longest we will wait on a payload whose length prefix already arrived; a
// peer that stalls mid-frame gets cut off instead of holding the tick hostage
const PAYLOAD_READ_TIMEOUT: Duration = Duration::from_millis(250);

/// A length-prefixed packet stream over TCP. Incoming traffic is drained
/// without blocking once per tick; a reset or EOF marks the connection closed
/// for the owner to reap.
pub struct Connection<T: Packet, V: Packet> {
    tcp_stream: TcpStream,
    incoming_packets: VecDeque<T>,
    outgoing_packets: VecDeque<V>,
    closed: bool,
}

impl<T: Packet, V: Packet> Connection<T, V> {
    pub fn new(tcp_stream: TcpStream) -> Connection<T, V> {
        // disable the Nagle algorithm to allow for real-time transfers
        tcp_stream
            .set_nodelay(true)
            .expect("could not turn off TCP delay");
        // only consulted by the blocking payload read; non-blocking reads
        // return WouldBlock immediately regardless
        tcp_stream
            .set_read_timeout(Some(PAYLOAD_READ_TIMEOUT))
            .expect("could not set read timeout");
        Connection {
            tcp_stream,
            incoming_packets: VecDeque::new(),
            outgoing_packets: VecDeque::new(),
            closed: false,
        }
    }

    fn set_nonblocking(&self) {
        self.tcp_stream
            .set_nonblocking(true)
            .expect("failed to set connection as non-blocking");
    }

    fn set_blocking(&self) {
        self.tcp_stream
            .set_nonblocking(false)
            .expect("failed to set connection back to blocking");
    }

    /// True once the peer has gone away; the owner is expected to drop this
    /// connection and release its id.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn sync_incoming(&mut self) {
        if self.closed {
            return;
        }

        // fetch packets for this connection until exhausted
        loop {
            // allows us to keep going if there's no input
            self.set_nonblocking();

            // attempt to parse the two bytes at the beginning of each
            // well-formed packet that represent the size in bytes of the
            // incoming payload
            let mut buffer: [u8; 2] = [0, 0];
            let packet_size = match self.tcp_stream.read_exact(&mut buffer) {
                Ok(_) => ((buffer[0] as u16) << 8) | buffer[1] as u16,
                // this error just means there's not enough new data on this connection
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => break,
                // the peer disconnected; flag it and let the owner reap us
                Err(ref e)
                    if e.kind() == ErrorKind::ConnectionReset
                        || e.kind() == ErrorKind::UnexpectedEof =>
                {
                    self.closed = true;
                    break;
                }
                Err(e) => {
                    println!("warning: unfamiliar IO error while polling events: {:?}", e);
                    self.closed = true;
                    break;
                }
            };

            // if we parsed a packet size, go ahead and read that amount, this
            // time blocking (up to the read timeout) until the entire payload
            // has arrived
            self.set_blocking();
            let mut payload = vec![0u8; packet_size as usize];
            if let Err(e) = self.tcp_stream.read_exact(&mut payload) {
                println!("warning: connection dropped mid-packet: {:?}", e);
                self.closed = true;
                break;
            }

            // a malformed payload is a warning and a dropped packet, never fatal
            match T::decode(&payload) {
                Ok(packet) => self.incoming_packets.push_back(packet),
                Err(e) => println!("warning: dropping malformed packet: {}", e),
            }
        }
    }

    pub fn pop_incoming(&mut self) -> Option<T> {
        self.incoming_packets.pop_front()
    }

    pub fn push_outgoing(&mut self, packet: V) {
        self.outgoing_packets.push_back(packet);
    }

    // send packets on this connection until exhausted
    pub fn sync_outgoing(&mut self) {
        while let Some(packet) = self.outgoing_packets.pop_front() {
            if self.closed {
                // undeliverable; the peer is already gone
                return;
            }
            let data = packet.encode();
            let size = data.len() as u16;
            if self
                .tcp_stream
                .write_all(&[(size >> 8) as u8, size as u8])
                .and_then(|_| self.tcp_stream.write_all(&data))
                .is_err()
            {
                self.closed = true;
            }
        }
    }
}
