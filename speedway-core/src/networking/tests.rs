use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use glam::DVec3;

use super::{
    ClientConnection, ClientIdTable, IdAllocator, Packet, PacketError, ServerConnection,
    WirePacket,
};

fn socket_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let client = TcpStream::connect(addr).unwrap();
    let (server, _) = listener.accept().unwrap();
    (client, server)
}

// poll the non-blocking receive path until a packet lands or we give up
fn drain_one(connection: &mut ServerConnection) -> Option<WirePacket> {
    for _ in 0..50 {
        connection.sync_incoming();
        if let Some(packet) = connection.pop_incoming() {
            return Some(packet);
        }
        thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn player_position_roundtrips_id_exactly() {
    let packet = WirePacket::PlayerPosition {
        id: 42,
        position: DVec3::new(12.25, -3.5, 1007.125),
    };
    let decoded = WirePacket::decode(&packet.encode()).unwrap();

    match decoded {
        WirePacket::PlayerPosition { id, position } => {
            assert_eq!(id, 42);
            // position survives to f32 precision under the fixed-width encoding
            assert!((position.x - 12.25).abs() < 1e-5);
            assert!((position.y - -3.5).abs() < 1e-5);
            assert!((position.z - 1007.125).abs() < 1e-5);
        }
        _ => panic!("decoded to the wrong packet kind"),
    }
}

#[test]
fn player_position_wire_layout() {
    let packet = WirePacket::PlayerPosition {
        id: 7,
        position: DVec3::new(1.0, 2.0, 3.0),
    };
    let data = packet.encode();

    assert_eq!(data.len(), 14);
    assert_eq!(data[0], 10); // type tag always in position 0
    assert_eq!(data[1], 7);
    assert_eq!(&data[2..6], &1.0f32.to_le_bytes());
    assert_eq!(&data[6..10], &2.0f32.to_le_bytes());
    assert_eq!(&data[10..14], &3.0f32.to_le_bytes());
}

#[test]
fn id_assignment_roundtrips_known_ids() {
    let packet = WirePacket::IdAssignment {
        assigned_id: 3,
        known_ids: vec![0, 1, 3, 9],
    };
    let data = packet.encode();
    assert_eq!(data[0], 0);
    assert_eq!(data[1], 3);

    assert_eq!(WirePacket::decode(&data).unwrap(), packet);
}

#[test]
fn id_assignment_empty_trailer_is_an_empty_list() {
    let decoded = WirePacket::decode(&[0, 17]).unwrap();
    assert_eq!(
        decoded,
        WirePacket::IdAssignment {
            assigned_id: 17,
            known_ids: Vec::new(),
        }
    );
}

#[test]
fn unknown_tag_is_a_droppable_error() {
    assert_eq!(WirePacket::decode(&[99, 1, 2, 3]), Err(PacketError::UnknownTag(99)));
    assert_eq!(WirePacket::decode(&[]), Err(PacketError::Empty));
}

#[test]
fn short_player_position_is_an_error() {
    assert_eq!(
        WirePacket::decode(&[10, 5, 0, 0]),
        Err(PacketError::TooShort { tag: 10, len: 4 })
    );
}

#[test]
fn framed_packets_cross_a_live_socket() {
    let (client_stream, server_stream) = socket_pair();
    let mut client = ClientConnection::new(client_stream);
    let mut server = ServerConnection::new(server_stream);

    let packet = WirePacket::PlayerPosition {
        id: 4,
        position: DVec3::new(1.0, 2.0, 3.0),
    };
    client.push_outgoing(packet.clone());
    client.sync_outgoing();

    // the 2-byte length prefix frames the payload end to end
    assert_eq!(drain_one(&mut server), Some(packet));
    assert!(!server.is_closed());
}

#[test]
fn malformed_frames_are_dropped_not_fatal() {
    let (mut client_stream, server_stream) = socket_pair();
    let mut server = ServerConnection::new(server_stream);

    // a well-framed payload with an unknown tag, then a well-formed packet
    client_stream.write_all(&[0, 1, 99]).unwrap();
    let good = WirePacket::IdAssignment {
        assigned_id: 17,
        known_ids: vec![2],
    };
    let payload = good.encode();
    client_stream.write_all(&[0, payload.len() as u8]).unwrap();
    client_stream.write_all(&payload).unwrap();

    // the bad frame is logged and skipped; the good one still arrives
    assert_eq!(drain_one(&mut server), Some(good));
    assert!(!server.is_closed());
}

#[test]
fn peer_hangup_marks_the_connection_closed() {
    let (client_stream, server_stream) = socket_pair();
    let mut server = ServerConnection::new(server_stream);
    drop(client_stream);

    for _ in 0..50 {
        server.sync_incoming();
        if server.is_closed() {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert!(server.is_closed());
}

#[test]
fn stalled_payload_cannot_hold_the_tick_hostage() {
    let (mut client_stream, server_stream) = socket_pair();
    let mut server = ServerConnection::new(server_stream);

    // a length prefix promising 14 bytes that never arrive
    client_stream.write_all(&[0, 14]).unwrap();
    thread::sleep(Duration::from_millis(20));

    let start = Instant::now();
    server.sync_incoming();

    // the read timeout bounds the wait and cuts the stalling peer off
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(server.is_closed());
}

#[test]
fn id_allocator_reuses_most_recently_released() {
    let mut allocator = IdAllocator::new();

    let first = allocator.allocate().unwrap();
    allocator.release(first);
    assert_eq!(allocator.allocate(), Some(first));

    // LIFO, not FIFO: release two, get the second one back first
    let a = allocator.allocate().unwrap();
    let b = allocator.allocate().unwrap();
    allocator.release(a);
    allocator.release(b);
    assert_eq!(allocator.allocate(), Some(b));
    assert_eq!(allocator.allocate(), Some(a));
}

#[test]
fn id_allocator_hands_out_exactly_255_ids() {
    let mut allocator = IdAllocator::new();
    let mut seen = Vec::new();
    while let Some(id) = allocator.allocate() {
        seen.push(id);
    }

    assert_eq!(seen.len(), 255);
    // 255 itself stays reserved as "unassigned"
    assert!(!seen.contains(&super::UNASSIGNED_ID));
    assert_eq!(allocator.remaining(), 0);
}

#[test]
fn client_bootstraps_from_first_assignment() {
    let mut table = ClientIdTable::new();

    // our own id appears in the known list; importing skips it
    table.handle_id_assignment(7, &[3, 7, 12]);
    assert_eq!(table.local_id(), Some(7));
    assert_eq!(table.remote_ids(), &[3, 12]);
}

#[test]
fn later_assignments_announce_new_peers() {
    let mut table = ClientIdTable::new();
    table.handle_id_assignment(7, &[3, 7]);

    // same packet kind, read as "peer 9 joined" now that we have an id
    table.handle_id_assignment(9, &[3, 7, 9]);
    assert_eq!(table.local_id(), Some(7));
    assert_eq!(table.remote_ids(), &[3, 9]);
}
