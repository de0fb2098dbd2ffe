//! Line commands read from stdin.

use std::fmt;

use beatgrid_types::{Direction, GlobalSettingsPatch, TriggerParam};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move(Direction),
    Toggle,
    Mode(String),
    Adjust(TriggerParam),
    NewArrangement,
    Select(usize),
    ToggleActive(usize),
    ArrangementVolume(usize, f32),
    Sample { id: String, name: String, url: String },
    Kit,
    Settings(GlobalSettingsPatch),
    Play(u64),
    Show,
    Save,
    Load,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

fn err(msg: impl Into<String>) -> ParseError {
    ParseError(msg.into())
}

fn arg<'a>(words: &[&'a str], i: usize, what: &str) -> Result<&'a str, ParseError> {
    words.get(i).copied().ok_or_else(|| err(format!("missing {}", what)))
}

fn number<T: std::str::FromStr>(words: &[&str], i: usize, what: &str) -> Result<T, ParseError> {
    let raw = arg(words, i, what)?;
    raw.parse()
        .map_err(|_| err(format!("bad {}: {}", what, raw)))
}

pub const HELP: &str = "\
commands:
  left | right | up | down      move the cursor
  toggle                        flip the trigger under the cursor
  mode <name>                   navigate | volume | pan | pitch | arrangement
  volume|pan|pitch <value>      set a parameter of the trigger under the cursor
  new                           create an arrangement
  select <n>                    edit arrangement n
  active <n>                    toggle arrangement n in playback
  arrvol <n> <volume>           set arrangement n's volume
  sample <id> <name> <url>      add a sample row
  kit                           add the configured starter kit
  settings bpm <n> | measures <n> | tempo <t>
  play [steps]                  print the hits for the next steps
  show | save | load | help | quit";

/// Parse one input line. Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = words.first() else {
        return Ok(None);
    };

    let cmd = match head {
        "left" | "h" => Command::Move(Direction::Left),
        "right" | "l" => Command::Move(Direction::Right),
        "up" | "k" => Command::Move(Direction::Up),
        "down" | "j" => Command::Move(Direction::Down),
        "toggle" | "t" => Command::Toggle,
        "mode" => Command::Mode(arg(&words, 1, "mode name")?.to_string()),
        "volume" => Command::Adjust(TriggerParam::Volume(number(&words, 1, "volume")?)),
        "pan" => Command::Adjust(TriggerParam::Pan(number(&words, 1, "pan")?)),
        "pitch" => Command::Adjust(TriggerParam::Pitch(number(&words, 1, "pitch")?)),
        "new" => Command::NewArrangement,
        "select" => Command::Select(number(&words, 1, "arrangement index")?),
        "active" => Command::ToggleActive(number(&words, 1, "arrangement index")?),
        "arrvol" => Command::ArrangementVolume(
            number(&words, 1, "arrangement index")?,
            number(&words, 2, "volume")?,
        ),
        "sample" => Command::Sample {
            id: arg(&words, 1, "sample id")?.to_string(),
            name: arg(&words, 2, "sample name")?.to_string(),
            url: arg(&words, 3, "sample url")?.to_string(),
        },
        "kit" => Command::Kit,
        "settings" => Command::Settings(parse_settings(&words[1..])?),
        "play" => Command::Play(match words.get(1) {
            Some(_) => number(&words, 1, "step count")?,
            None => 1,
        }),
        "show" => Command::Show,
        "save" => Command::Save,
        "load" => Command::Load,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(err(format!("unknown command: {}", other))),
    };
    Ok(Some(cmd))
}

fn parse_settings(words: &[&str]) -> Result<GlobalSettingsPatch, ParseError> {
    if words.is_empty() || words.len() % 2 != 0 {
        return Err(err("settings takes <field> <value> pairs"));
    }
    let mut patch = GlobalSettingsPatch::default();
    for pair in words.chunks(2) {
        match pair[0] {
            "bpm" | "beats" => patch.beats_per_measure = Some(number(pair, 1, "beats per measure")?),
            "measures" => patch.measures = Some(number(pair, 1, "measures")?),
            "tempo" => patch.tempo = Some(number(pair, 1, "tempo")?),
            other => return Err(err(format!("unknown setting: {}", other))),
        }
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn movement_aliases() {
        assert_eq!(parse("right").unwrap(), Some(Command::Move(Direction::Right)));
        assert_eq!(parse("k").unwrap(), Some(Command::Move(Direction::Up)));
    }

    #[test]
    fn parameter_commands() {
        assert_eq!(
            parse("volume 0.5").unwrap(),
            Some(Command::Adjust(TriggerParam::Volume(0.5)))
        );
        assert_eq!(
            parse("arrvol 1 0.25").unwrap(),
            Some(Command::ArrangementVolume(1, 0.25))
        );
        assert!(parse("pan").is_err());
        assert!(parse("pitch up").is_err());
    }

    #[test]
    fn settings_pairs() {
        let Some(Command::Settings(patch)) = parse("settings bpm 3 measures 2").unwrap() else {
            panic!("expected settings");
        };
        assert_eq!(patch.beats_per_measure, Some(3));
        assert_eq!(patch.measures, Some(2));
        assert_eq!(patch.tempo, None);
        assert!(parse("settings bpm").is_err());
        assert!(parse("settings swing 3").is_err());
    }

    #[test]
    fn play_defaults_to_one_step() {
        assert_eq!(parse("play").unwrap(), Some(Command::Play(1)));
        assert_eq!(parse("play 8").unwrap(), Some(Command::Play(8)));
    }

    #[test]
    fn unknown_command() {
        assert!(parse("dance").is_err());
    }
}
