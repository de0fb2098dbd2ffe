mod common;

use beatgrid_core::persistence::{BlobStore, FileBlobStore, STATE_KEY};
use beatgrid_core::{DrumMachine, LoadOutcome};
use beatgrid_types::{Direction, DrumMachineState, Mode, TriggerParam};

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let machine = DrumMachine::new(Box::new(FileBlobStore::new(dir.path())));
    for sample in common::kit() {
        machine.add_sample(sample).unwrap();
    }
    machine.move_cursor(Direction::Right).unwrap();
    machine.toggle_trigger().unwrap();
    machine.adjust_trigger_parameter(TriggerParam::Pitch(-2.0)).unwrap();
    machine.set_mode(Mode::Pitch).unwrap();
    machine.create_arrangement().unwrap();
    machine.save_state().unwrap();
    assert!(dir.path().join("drumMachineState.json").exists());

    let restored = DrumMachine::new(Box::new(FileBlobStore::new(dir.path())));
    assert_eq!(restored.load_state().unwrap(), LoadOutcome::Loaded);
    assert_eq!(*restored.state(), *machine.state());
}

#[test]
fn test_missing_blob_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let machine = DrumMachine::new(Box::new(FileBlobStore::new(dir.path())));
    machine.move_cursor(Direction::Right).unwrap();
    let before = machine.state();

    assert_eq!(machine.load_state().unwrap(), LoadOutcome::Missing);
    assert_eq!(*machine.state(), *before);
}

#[test]
fn test_corrupt_blob_keeps_state() {
    let (machine, blobs) = common::make_machine_with_kit();
    let before = machine.state();

    blobs.write(STATE_KEY, "{ not json").unwrap();
    assert_eq!(machine.load_state().unwrap(), LoadOutcome::Corrupt);
    assert_eq!(*machine.state(), *before);
}

#[test]
fn test_blob_breaking_invariants_is_rejected() {
    let (machine, blobs) = common::make_machine_with_kit();

    let mut broken = DrumMachineState::new();
    broken.current_arrangement_index = 5;
    blobs
        .write(STATE_KEY, &serde_json::to_string(&broken).unwrap())
        .unwrap();

    assert_eq!(machine.load_state().unwrap(), LoadOutcome::Corrupt);
    assert_eq!(machine.state().samples.len(), 4);
}

#[test]
fn test_load_notifies_subscribers() {
    let (machine, _blobs) = common::make_machine_with_kit();
    machine.save_state().unwrap();

    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let c = std::sync::Arc::clone(&calls);
    let _sub = machine.subscribe(move |_| {
        c.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });
    machine.load_state().unwrap();
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_round_trip_survives_rejected_sample() {
    let (machine, _blobs) = common::make_machine_with_kit();
    let sample = beatgrid_types::Sample {
        default_volume: f32::INFINITY,
        ..beatgrid_types::Sample::new("tom", "Tom", "tom.wav")
    };
    assert!(machine.add_sample(sample).is_err());

    machine.save_state().unwrap();
    assert_eq!(machine.load_state().unwrap(), LoadOutcome::Loaded);
    assert_eq!(machine.state().samples.len(), 4);
}
