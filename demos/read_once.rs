extern crate cansock;
extern crate env_logger;
extern crate log;

use cansock::{BusChannel, Reception};

fn main() {
    env_logger::init();
    let bus = BusChannel::open("vcan0").unwrap();

    loop {
        match bus.receive(8) {
            Ok(Reception::Frame(rx)) => log::info!("{:03X} {:02X?}", rx.id(), rx.payload()),
            Ok(Reception::NoData) => continue,
            Ok(Reception::Eof) => break,
            Err(e) => { log::error!("Error: {}", e); break; },
        }
    }

    bus.close().unwrap();
}
