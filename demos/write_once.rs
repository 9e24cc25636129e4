extern crate cansock;
extern crate env_logger;
extern crate log;

use cansock::{BusChannel, ShouldRetry};

fn main() {
    env_logger::init();
    let bus = BusChannel::open("vcan0").unwrap();

    let data: [u8; 4] = [222, 173, 190, 239];
    let id: u32 = 123;

    // the channel never retries, so this demo does
    loop {
        match bus.send(id, &data) {
            Ok(n) => { log::info!("Frame Send Success ({} bytes)", n); break; },
            Err(ref e) if e.should_retry() => continue,
            Err(e) => { log::error!("Frame Send Error {}", e); break; },
        }
    }
}
