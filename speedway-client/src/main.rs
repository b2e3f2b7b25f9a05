use std::io;
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use glam::DVec3;

use speedway_core::networking::{ClientIdTable, ClientConnection, WirePacket};
use speedway_core::GLOBAL_CONFIG;

// the headless client drives a circle of this radius so there is always a
// fresh position worth reporting
const DEMO_ORBIT_RADIUS: f64 = 20.0;

fn main() {
    if let Err(e) = run() {
        println!("client starting failed: {}", e);
    }
}

fn run() -> io::Result<()> {
    let addr = format!("{}:{}", GLOBAL_CONFIG.server_address, GLOBAL_CONFIG.port);
    let stream = TcpStream::connect(&addr)?;
    println!("connected to server at {}", addr);

    let mut connection = ClientConnection::new(stream);
    let mut ids = ClientIdTable::new();

    let tick = Duration::from_millis(GLOBAL_CONFIG.server_tick_ms);
    let ticks_per_log = (1000 / GLOBAL_CONFIG.server_tick_ms.max(1)).max(1);

    let mut speed = 0.0_f64;
    let mut angle = 0.0_f64;
    let mut tick_count: u64 = 0;

    loop {
        connection.sync_incoming();
        while let Some(packet) = connection.pop_incoming() {
            match packet {
                WirePacket::IdAssignment {
                    assigned_id,
                    known_ids,
                } => {
                    let already_bootstrapped = ids.local_id().is_some();
                    ids.handle_id_assignment(assigned_id, &known_ids);
                    if already_bootstrapped {
                        println!("peer {} joined the race", assigned_id);
                    } else {
                        println!(
                            "assigned id {}; {} other racers known",
                            assigned_id,
                            ids.remote_ids().len()
                        );
                    }
                }
                WirePacket::PlayerPosition { id, position } => {
                    // once a second is plenty for a console readout
                    if tick_count % ticks_per_log == 0 {
                        println!("car {} is at {:.1} {:.1} {:.1}", id, position.x, position.y, position.z);
                    }
                }
            }
        }

        if connection.is_closed() {
            println!("server closed the connection");
            return Ok(());
        }

        // ease up to top speed and keep circling
        let dt = tick.as_secs_f64();
        speed = (speed + GLOBAL_CONFIG.car_accelerator * dt).min(GLOBAL_CONFIG.max_car_speed);
        angle += speed / DEMO_ORBIT_RADIUS * dt;
        let position = DVec3::new(
            DEMO_ORBIT_RADIUS * angle.cos(),
            0.0,
            DEMO_ORBIT_RADIUS * angle.sin(),
        );

        // nothing to report until the server has told us who we are
        if let Some(id) = ids.local_id() {
            connection.push_outgoing(WirePacket::PlayerPosition { id, position });
        }
        connection.sync_outgoing();

        tick_count += 1;
        thread::sleep(tick);
    }
}
