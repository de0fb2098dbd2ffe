#![allow(dead_code)]

use beatgrid_core::persistence::MemoryBlobStore;
use beatgrid_core::DrumMachine;
use beatgrid_types::Sample;

pub fn kit() -> Vec<Sample> {
    ["Clap", "ClosedHH", "Kick", "Snare"]
        .iter()
        .map(|name| {
            Sample::new(
                name.to_lowercase(),
                *name,
                format!("samples/TR-505_Tape_{}.wav", name),
            )
        })
        .collect()
}

/// A machine over an in-memory blob store, plus a handle on that store.
pub fn make_machine() -> (DrumMachine, MemoryBlobStore) {
    let blobs = MemoryBlobStore::new();
    (DrumMachine::new(Box::new(blobs.clone())), blobs)
}

/// A machine with the four-sample kit loaded.
pub fn make_machine_with_kit() -> (DrumMachine, MemoryBlobStore) {
    let (machine, blobs) = make_machine();
    for sample in kit() {
        machine.add_sample(sample).unwrap();
    }
    (machine, blobs)
}
