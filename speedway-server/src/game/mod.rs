use std::collections::HashMap;
use std::io;
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use glam::DVec3;

use speedway_core::networking::{IdAllocator, ServerConnection, WirePacket};
use speedway_core::player_inputs::PlayerInputs;
use speedway_core::{CarID, GLOBAL_CONFIG};

use crate::sim::car::Car;
use crate::sim::control::{ControlPolicy, SeekState};
use crate::sim::items::{self, ItemBox};
use crate::sim::{self, CarArena};
use crate::track::Track;

pub struct GameServer {
    listener: TcpListener,
    connections: HashMap<CarID, ServerConnection>,
    id_allocator: IdAllocator,
    cars: CarArena,
    track: Track,
    item_boxes: Vec<ItemBox>,
    race_clock: Duration,
}

impl GameServer {
    pub fn new(ip_addr: String) -> io::Result<GameServer> {
        // start the TCP listening service; accepts are polled, never blocking
        let listener = TcpListener::bind(&ip_addr)?;
        listener.set_nonblocking(true)?;
        println!("game server now listening on {}", ip_addr);

        let track = Track::generate();
        let item_boxes = items::place_items(&track);
        println!(
            "generated track with {} waypoints, {} checkpoints and {} item boxes",
            track.waypoints.len(),
            track.checkpoints.len(),
            item_boxes.len()
        );

        let mut id_allocator = IdAllocator::new();
        let mut cars = CarArena::new();

        // AI cars claim wire ids up front so clients can address them like anyone else
        let spawn_displacement = DVec3::new(4.0, 2.0, -4.0);
        let mut spawn = track.start_point();
        for _ in 0..GLOBAL_CONFIG.ai_car_amount {
            let id = id_allocator
                .allocate()
                .expect("ran out of peer ids while seeding AI cars");
            spawn += spawn_displacement;
            let heading = track.flow_direction(spawn);
            let policy = ControlPolicy::Seek(SeekState { target_index: 1 });
            cars.insert(id, Car::spawn(id, policy, spawn, heading));
        }

        Ok(GameServer {
            listener,
            connections: HashMap::new(),
            id_allocator,
            cars,
            track,
            item_boxes,
            race_clock: Duration::ZERO,
        })
    }

    // WARNING: this function never returns
    pub fn start_loop(&mut self) {
        let max_server_tick_duration = Duration::from_millis(GLOBAL_CONFIG.server_tick_ms);

        loop {
            let start_time = Instant::now();

            self.accept_new_peers();

            // poll for packets and add them to the incoming queues
            self.connections
                .values_mut()
                .for_each(|con| con.sync_incoming());

            self.process_incoming_packets();
            self.reap_disconnected_peers();

            self.simulate_game(max_server_tick_duration);
            self.sync_state();

            // empty outgoing packet queues and send to clients
            self.connections
                .values_mut()
                .for_each(|con| con.sync_outgoing());

            self.race_clock += max_server_tick_duration;

            // wait out whatever is left of the tick
            if let Some(remaining_tick_duration) =
                max_server_tick_duration.checked_sub(start_time.elapsed())
            {
                thread::sleep(remaining_tick_duration);
            }
        }
    }

    fn accept_new_peers(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((socket, addr)) => {
                    let id = match self.id_allocator.allocate() {
                        Some(id) => id,
                        None => {
                            println!("turning away {}: no peer ids left", addr);
                            continue;
                        }
                    };
                    println!("new connection from {} assigned id {}", addr.ip(), id);
                    self.connections.insert(id, ServerConnection::new(socket));

                    let spawn = self.track.start_point() + DVec3::new(0.0, 5.0, 0.0);
                    let heading = self.track.flow_direction(spawn);
                    let policy = ControlPolicy::Human(PlayerInputs::default());
                    let mut car = Car::spawn(id, policy, spawn, heading);
                    car.remote = true;
                    self.cars.insert(id, car);

                    // one broadcast serves both readings: the newcomer bootstraps
                    // from it, everyone else appends the new id
                    let packet = WirePacket::IdAssignment {
                        assigned_id: id,
                        known_ids: self.cars.keys().copied().collect(),
                    };
                    for con in self.connections.values_mut() {
                        con.push_outgoing(packet.clone());
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    println!("couldn't get connecting client info {:?}", e);
                    break;
                }
            }
        }
    }

    // handle every packet in received order
    fn process_incoming_packets(&mut self) {
        for (peer_id, connection) in self.connections.iter_mut() {
            while let Some(packet) = connection.pop_incoming() {
                match packet {
                    WirePacket::PlayerPosition { id, position } => {
                        // clients only speak for their own car
                        if id != *peer_id {
                            println!(
                                "warning: peer {} sent a position for car {}, dropping",
                                peer_id, id
                            );
                            continue;
                        }
                        if let Some(car) = self.cars.get_mut(&id) {
                            car.position = position;
                        }
                    }
                    WirePacket::IdAssignment { .. } => {
                        // the server hands out ids, it does not take them
                        println!("warning: unexpected IdAssignment from peer {}, dropping", peer_id);
                    }
                }
            }
        }
    }

    /// Drop closed connections, despawn their cars and put their ids straight
    /// back on top of the free-list. No graceful drain: anything still queued
    /// for a freed id is undeliverable and lost.
    fn reap_disconnected_peers(&mut self) {
        let dropped: Vec<CarID> = self
            .connections
            .iter()
            .filter(|(_, con)| con.is_closed())
            .map(|(id, _)| *id)
            .collect();

        for id in dropped {
            println!("peer {} disconnected", id);
            self.connections.remove(&id);
            self.cars.remove(&id);
            self.id_allocator.release(id);
        }
    }

    // update game state
    fn simulate_game(&mut self, dt: Duration) {
        let mut rng = rand::thread_rng();
        sim::simulate_tick(
            &mut self.cars,
            &self.track,
            &mut self.item_boxes,
            dt,
            self.race_clock,
            &mut rng,
        );
    }

    // queue up sending updated game state: every car's position goes to every
    // client except the one that owns it
    fn sync_state(&mut self) {
        for (id, car) in &self.cars {
            let packet = WirePacket::PlayerPosition {
                id: *id,
                position: car.position,
            };
            for (peer_id, connection) in self.connections.iter_mut() {
                if peer_id == id {
                    continue;
                }
                connection.push_outgoing(packet.clone());
            }
        }
    }
}
