use speedway_core::GLOBAL_CONFIG;

mod checkpoints;
mod game;
mod physics;
mod progress;
mod sim;
mod track;

fn main() {
    let ip_addr = format!("0.0.0.0:{}", GLOBAL_CONFIG.port);
    match game::GameServer::new(ip_addr) {
        // kick off the game loop
        Ok(mut server) => server.start_loop(),
        Err(e) => println!("server starting failed: {}", e),
    }
}
