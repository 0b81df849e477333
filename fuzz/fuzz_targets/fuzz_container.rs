#![no_main]

use huffpack::{Container, ContainerConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parse arbitrary bytes as a container; must never panic
    let config = ContainerConfig { verify_checksum: false };
    if let Ok(container) = Container::read_from(data, &config) {
        let _ = container.decode();
    }
});
