//! This module contains the command-line configuration of the terminal front end.
//!
//! Every option can also be given through an environment variable, so a preferred setup can live in
//! the shell profile rather than be typed out on every run.

use std::collections::HashMap;

use clap::Parser;
use regex::Regex;

use crate::game::GameSettings;
use crate::motion::JumpStep;
use crate::road::{DEFAULT_ROAD_LENGTH, MAX_ROAD_LENGTH};

/// The pattern a `--clip` value has to match: a known clip name and a duration in seconds.
const CLIP_PATTERN: &str = r"\A(one-step|two-step)=(\d+(?:\.\d+)?)\z";

/// This struct holds information about the application when it comes to the command-line argument
/// parser, clap. The derive attributes set up the options and their environment fallbacks.
#[derive(Parser, Debug)]
#[command(name = "lanejump", version, about)]
#[command(next_line_help = true)]
pub(crate) struct Cli {
    /// The number of tiles in the road.
    ///
    /// A new road of this length is generated every time the game goes back to its start menu.
    #[arg(short = 'l', long, default_value_t = DEFAULT_ROAD_LENGTH, value_parser = verify_road_length)]
    #[arg(env = "LANEJUMP_ROAD_LENGTH", value_name = "TILES")]
    road_length: usize,
    /// The seed for road generation.
    ///
    /// The same seed always produces the same sequence of roads. Without one, every run is
    /// different.
    #[arg(short, long)]
    #[arg(env = "LANEJUMP_SEED", value_name = "SEED")]
    seed: Option<u64>,
    /// The duration of a jump animation, as NAME=SECONDS; may be repeated.
    ///
    /// The names are `one-step` and `two-step`. A jump lasts exactly as long as its animation.
    #[arg(long = "clip", value_parser = parse_clip, value_name = "NAME=SECONDS")]
    clips: Vec<ClipDuration>,
    /// The number of frames drawn per second while a jump is in flight.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..=240))]
    #[arg(env = "LANEJUMP_FPS", value_name = "FPS")]
    fps: u16,
    /// Print debug logs to standard error.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// This function returns the table of clip durations, with the command-line overrides laid over
    /// the defaults.
    pub(crate) fn clip_table(&self) -> HashMap<String, f32> {
        let mut table: HashMap<String, f32> = JumpStep::ALL
            .iter()
            .map(|&step| (step.clip().to_owned(), default_clip_duration(step)))
            .collect();

        for ClipDuration { name, seconds } in &self.clips {
            let _ = table.insert(name.clone(), *seconds);
        }

        table
    }

    /// This function returns the time between two frames, in seconds.
    pub(crate) fn frame_time(&self) -> f32 {
        1.0 / f32::from(self.fps)
    }

    /// This function returns the default log filter handed to `env_logger`. `RUST_LOG` still takes
    /// precedence over it.
    pub(crate) const fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// This function returns the seed for road generation, if one was given.
    pub(crate) const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// This function returns the settings to build the game with.
    pub(crate) const fn settings(&self) -> GameSettings {
        GameSettings {
            road_length: self.road_length,
        }
    }
}

/// This struct holds a single `--clip` override.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClipDuration {
    /// This field contains the name of the clip.
    name: String,
    /// This field contains the duration of the clip, in seconds.
    seconds: f32,
}

/// This function returns how long a jump animation lasts when the command line doesn't say.
const fn default_clip_duration(step: JumpStep) -> f32 {
    match step {
        JumpStep::One => 0.3,
        JumpStep::Two => 0.45,
    }
}

/// This function serves as a value parser for the `--clip` option. The value has to match
/// `NAME=SECONDS` for a known clip, with a strictly positive duration.
fn parse_clip(string: &str) -> Result<ClipDuration, String> {
    let re = Regex::new(CLIP_PATTERN).map_err(|err| err.to_string())?;
    let Some(captures) = re.captures(string) else {
        return Err("expected one-step=SECONDS or two-step=SECONDS".to_owned());
    };

    let (Some(name), Some(seconds)) = (captures.get(1), captures.get(2)) else {
        return Err("expected one-step=SECONDS or two-step=SECONDS".to_owned());
    };
    let seconds: f32 = seconds
        .as_str()
        .parse()
        .map_err(|err| format!("invalid duration: {err}"))?;

    if seconds <= 0.0 {
        return Err("a clip must last longer than zero seconds".to_owned());
    }

    Ok(ClipDuration {
        name: name.as_str().to_owned(),
        seconds,
    })
}

/// This function serves as a value parser for the road length, which must be at least one tile and
/// at most [`MAX_ROAD_LENGTH`] tiles.
fn verify_road_length(string: &str) -> Result<usize, String> {
    match string.parse::<usize>() {
        Ok(0) => Err("the road needs at least one tile".to_owned()),
        Ok(length) if length > MAX_ROAD_LENGTH => Err(format!(
            "the road can be at most {MAX_ROAD_LENGTH} tiles long"
        )),
        Ok(length) => Ok(length),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::{parse_clip, verify_road_length, Cli, ClipDuration};
    use crate::road::{DEFAULT_ROAD_LENGTH, MAX_ROAD_LENGTH};

    #[test]
    fn clips_parse_name_and_seconds() {
        assert_eq!(
            parse_clip("one-step=0.25"),
            Ok(ClipDuration {
                name: "one-step".to_owned(),
                seconds: 0.25
            })
        );
        assert!(parse_clip("two-step=1").is_ok());
        assert!(parse_clip("three-step=1").is_err());
        assert!(parse_clip("one-step=").is_err());
        assert!(parse_clip("one-step=-1").is_err());
        assert!(parse_clip("one-step=0").is_err());
        assert!(parse_clip(" one-step=1").is_err());
    }

    #[test]
    fn road_length_must_be_positive() {
        assert_eq!(verify_road_length("12"), Ok(12));
        assert!(verify_road_length("0").is_err());
        assert!(verify_road_length("many").is_err());
    }

    #[test]
    fn road_length_is_bounded() {
        assert_eq!(
            verify_road_length(&MAX_ROAD_LENGTH.to_string()),
            Ok(MAX_ROAD_LENGTH)
        );
        assert!(verify_road_length(&(MAX_ROAD_LENGTH + 1).to_string()).is_err());
        assert!(verify_road_length(&usize::MAX.to_string()).is_err());
        assert!(Cli::try_parse_from(["lanejump", "--road-length", "18446744073709551615"]).is_err());
        assert!(Cli::try_parse_from(["lanejump", "--road-length", "10000000000"]).is_err());
    }

    #[test]
    fn fps_is_bounded() {
        assert!(Cli::try_parse_from(["lanejump", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["lanejump", "--fps", "241"]).is_err());

        let Ok(cli) = Cli::try_parse_from(["lanejump", "--fps", "240"]) else {
            panic!("240 fps should parse");
        };
        assert!((cli.frame_time() - 1.0 / 240.0).abs() < f32::EPSILON);
    }

    #[test]
    fn verbose_lowers_the_log_filter() {
        let (Ok(quiet), Ok(verbose)) = (
            Cli::try_parse_from(["lanejump"]),
            Cli::try_parse_from(["lanejump", "--verbose"]),
        ) else {
            panic!("arguments should parse");
        };

        assert_eq!(quiet.log_filter(), "warn");
        assert_eq!(verbose.log_filter(), "debug");
    }

    #[test]
    fn command_line_overrides_defaults() {
        let cli = Cli::try_parse_from([
            "lanejump",
            "--road-length",
            "7",
            "--seed",
            "99",
            "--clip",
            "two-step=0.8",
        ]);
        let Ok(cli) = cli else {
            panic!("arguments should parse");
        };

        assert_eq!(cli.settings().road_length, 7);
        assert_eq!(cli.seed(), Some(99));
        let table = cli.clip_table();
        assert_eq!(table.get("one-step").copied(), Some(0.3));
        assert_eq!(table.get("two-step").copied(), Some(0.8));
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn defaults_without_arguments() {
        let Ok(cli) = Cli::try_parse_from(["lanejump"]) else {
            panic!("no arguments should parse");
        };

        assert_eq!(cli.settings().road_length, DEFAULT_ROAD_LENGTH);
        assert!((cli.frame_time() - 1.0 / 60.0).abs() < f32::EPSILON);
    }
}
