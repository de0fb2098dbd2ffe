mod command;
mod render;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use beatgrid_core::config::Config;
use beatgrid_core::persistence::FileBlobStore;
use beatgrid_core::{DrumMachine, LoadOutcome};
use beatgrid_types::{step_hits, DrumMachineState, Sample};

use command::Command;

/// `<config dir>/beatgrid/beatgrid.log`, next to the user's config.toml.
fn log_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("beatgrid")
        .join("beatgrid.log")
}

/// Open the log file, falling back to the temp dir. Returns the path used.
fn open_log_file() -> io::Result<(File, PathBuf)> {
    let preferred = log_path();
    if let Some(parent) = preferred.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match File::create(&preferred) {
        Ok(file) => Ok((file, preferred)),
        Err(_) => {
            let fallback = std::env::temp_dir().join("beatgrid.log");
            File::create(&fallback).map(|file| (file, fallback))
        }
    }
}

fn init_logging(verbose: bool) {
    use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let (log_file, path) = match open_log_file() {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("beatgrid: running without a log file: {}", e);
            return;
        }
    };

    // store/dispatch/persistence/config targets are what tell entries apart
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();
    if WriteLogger::init(log_level, config, log_file).is_err() {
        eprintln!("beatgrid: logger already initialised");
        return;
    }

    log::info!("beatgrid starting (log level: {:?}, file: {})", log_level, path.display());
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let fresh = args.iter().any(|a| a == "--fresh");
    init_logging(verbose);

    let config = Config::load();
    let blobs = FileBlobStore::new(config.storage_dir());
    let machine = DrumMachine::with_state(
        DrumMachineState::new_with_defaults(config.defaults()),
        Box::new(blobs),
    )
    .with_key(config.storage_key());

    if !fresh {
        match machine.load_state() {
            Ok(LoadOutcome::Loaded) => println!("restored saved state"),
            Ok(LoadOutcome::Missing) => {}
            Ok(LoadOutcome::Corrupt) => println!("saved state is unreadable; starting fresh"),
            Err(e) => println!("could not load saved state: {}", e),
        }
    }

    let _renderer = machine.subscribe(|state| print!("{}", render::render(state)));
    print!("{}", render::render(&machine.state()));

    run(&machine, &config.kit())
}

fn run(machine: &DrumMachine, kit: &[Sample]) -> io::Result<()> {
    let stdin = io::stdin();
    let mut playhead: u64 = 0;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let cmd = match command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{} (try `help`)", e);
                continue;
            }
        };

        let result = match cmd {
            Command::Quit => break,
            Command::Help => {
                println!("{}", command::HELP);
                Ok(())
            }
            Command::Show => {
                print!("{}", render::render(&machine.state()));
                Ok(())
            }
            Command::Play(steps) => {
                let state = machine.state();
                for _ in 0..steps {
                    let hits = step_hits(&state, playhead);
                    let names: Vec<String> = hits
                        .iter()
                        .map(|h| format!("{}@{:.2}", h.sample.name, h.gain()))
                        .collect();
                    println!("step {:>3}: {}", playhead, names.join(" "));
                    playhead += 1;
                }
                Ok(())
            }
            Command::Save => match machine.save_state() {
                Ok(()) => {
                    println!("saved");
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            },
            Command::Load => match machine.load_state() {
                Ok(LoadOutcome::Loaded) => Ok(()),
                Ok(LoadOutcome::Missing) => {
                    println!("nothing saved yet");
                    Ok(())
                }
                Ok(LoadOutcome::Corrupt) => {
                    println!("saved state is unreadable; keeping current state");
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            },
            Command::Kit => add_kit(machine, kit),
            other => apply(machine, other).map_err(|e| e.to_string()),
        };

        if let Err(e) = result {
            println!("error: {}", e);
        }
    }

    Ok(())
}

fn apply(machine: &DrumMachine, cmd: Command) -> Result<(), beatgrid_core::ActionError> {
    match cmd {
        Command::Move(direction) => machine.move_cursor(direction),
        Command::Toggle => machine.toggle_trigger(),
        Command::Mode(name) => machine.set_mode_named(&name),
        Command::Adjust(param) => machine.adjust_trigger_parameter(param),
        Command::NewArrangement => machine.create_arrangement(),
        Command::Select(index) => machine.select_arrangement(index),
        Command::ToggleActive(index) => machine.toggle_arrangement_active(index),
        Command::ArrangementVolume(index, volume) => machine.set_arrangement_volume(index, volume),
        Command::Sample { id, name, url } => machine.add_sample(Sample::new(id, name, url)),
        Command::Settings(patch) => machine.update_global_settings(patch),
        Command::Kit
        | Command::Play(_)
        | Command::Show
        | Command::Save
        | Command::Load
        | Command::Help
        | Command::Quit => Ok(()),
    }
}

/// Add every kit sample not already present.
fn add_kit(machine: &DrumMachine, kit: &[Sample]) -> Result<(), String> {
    let present: Vec<String> = machine.state().samples.iter().map(|s| s.id.clone()).collect();
    for sample in kit.iter().filter(|s| !present.contains(&s.id)) {
        machine.add_sample(sample.clone()).map_err(|e| e.to_string())?;
    }
    Ok(())
}
