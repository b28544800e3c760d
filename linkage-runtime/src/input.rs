use std::{error, fmt, str::FromStr};

use crate::{session::Session, surface::Surface, trace::TraceWriter, Error};

/// Usage shown by the `help` command.
pub const USAGE: &str = "\
Commands:
  set <joint> <deg>    Set joint angle in degrees (also: <joint> <deg>)
  step <joint> <deg>   Move joint angle relative to its current value
  reset                Return all joints to their initial angle
  show                 Redraw the arm
  help                 Show this message
  quit                 Exit";

/// Input command.
///
/// Joints are numbered from 1 on input, the command carries the
/// zero based joint index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Set joint angle in degrees.
    Set { joint: usize, degrees: f64 },
    /// Move joint angle in degrees.
    Step { joint: usize, delta: f64 },
    /// Reset all joints.
    Reset,
    /// Redraw.
    Show,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to parse.
    Empty,
    /// Command is not known.
    UnknownCommand(String),
    /// Command requires more arguments.
    MissingArgument(&'static str),
    /// Command received too many arguments.
    TrailingArgument(String),
    /// Joint is not a positive number.
    InvalidJoint(String),
    /// Angle is not a finite number.
    InvalidAngle(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::UnknownCommand(command) => write!(f, "unknown command '{}'", command),
            ParseError::MissingArgument(argument) => write!(f, "missing argument <{}>", argument),
            ParseError::TrailingArgument(argument) => {
                write!(f, "unexpected argument '{}'", argument)
            }
            ParseError::InvalidJoint(joint) => write!(f, "invalid joint '{}'", joint),
            ParseError::InvalidAngle(angle) => write!(f, "invalid angle '{}'", angle),
        }
    }
}

impl error::Error for ParseError {}

fn parse_joint(value: Option<&str>) -> Result<usize, ParseError> {
    let value = value.ok_or(ParseError::MissingArgument("joint"))?;

    let value = value
        .trim_start_matches(|c: char| c == 'θ' || c == 't')
        .to_string();

    match value.parse::<usize>() {
        Ok(joint) if joint > 0 => Ok(joint - 1),
        _ => Err(ParseError::InvalidJoint(value)),
    }
}

fn parse_angle(value: Option<&str>) -> Result<f64, ParseError> {
    let value = value.ok_or(ParseError::MissingArgument("deg"))?;

    match value.trim_end_matches('°').parse::<f64>() {
        Ok(angle) if angle.is_finite() => Ok(angle),
        _ => Err(ParseError::InvalidAngle(value.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let command = tokens.next().ok_or(ParseError::Empty)?;

        let command = match command.to_lowercase().as_str() {
            "set" | "s" => Command::Set {
                joint: parse_joint(tokens.next())?,
                degrees: parse_angle(tokens.next())?,
            },
            "step" | "+" => Command::Step {
                joint: parse_joint(tokens.next())?,
                delta: parse_angle(tokens.next())?,
            },
            "reset" | "r" => Command::Reset,
            "show" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if command.starts_with(|c: char| c.is_ascii_digit() || c == 'θ') => Command::Set {
                joint: parse_joint(Some(command))?,
                degrees: parse_angle(tokens.next())?,
            },
            _ => return Err(ParseError::UnknownCommand(command.to_string())),
        };

        match tokens.next() {
            Some(argument) => Err(ParseError::TrailingArgument(argument.to_string())),
            None => Ok(command),
        }
    }
}

/// What the caller should do after a command was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Wait for the next command.
    Continue,
    /// Present the usage text.
    Usage(&'static str),
    /// End the session.
    Quit,
}

impl Command {
    /// Apply the command to a session.
    pub fn apply<S: Surface, T: TraceWriter>(
        &self,
        session: &mut Session<S, T>,
    ) -> Result<Outcome, Error> {
        match *self {
            Command::Set { joint, degrees } => session.on_angle_changed(joint, degrees)?,
            Command::Step { joint, delta } => session.step(joint, delta)?,
            Command::Reset => session.reset()?,
            Command::Show => session.refresh()?,
            Command::Help => return Ok(Outcome::Usage(USAGE)),
            Command::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            "set 1 45".parse::<Command>(),
            Ok(Command::Set {
                joint: 0,
                degrees: 45.0
            })
        );
        assert_eq!(
            "2 -12.5".parse::<Command>(),
            Ok(Command::Set {
                joint: 1,
                degrees: -12.5
            })
        );
        assert_eq!(
            "  θ3   90°  ".parse::<Command>(),
            Ok(Command::Set {
                joint: 2,
                degrees: 90.0
            })
        );
        assert_eq!(
            "SET t1 0".parse::<Command>(),
            Ok(Command::Set {
                joint: 0,
                degrees: 0.0
            })
        );
    }

    #[test]
    fn test_parse_step() {
        assert_eq!(
            "step 2 -5".parse::<Command>(),
            Ok(Command::Step {
                joint: 1,
                delta: -5.0
            })
        );
        assert_eq!(
            "+ 1 10".parse::<Command>(),
            Ok(Command::Step {
                joint: 0,
                delta: 10.0
            })
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("Exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(ParseError::UnknownCommand("jump".to_string()))
        );
        assert_eq!(
            "set 1".parse::<Command>(),
            Err(ParseError::MissingArgument("deg"))
        );
        assert_eq!(
            "set".parse::<Command>(),
            Err(ParseError::MissingArgument("joint"))
        );
        assert_eq!(
            "set 0 10".parse::<Command>(),
            Err(ParseError::InvalidJoint("0".to_string()))
        );
        assert_eq!(
            "1 ten".parse::<Command>(),
            Err(ParseError::InvalidAngle("ten".to_string()))
        );
        assert_eq!(
            "1 NaN".parse::<Command>(),
            Err(ParseError::InvalidAngle("NaN".to_string()))
        );
        assert_eq!(
            "reset now".parse::<Command>(),
            Err(ParseError::TrailingArgument("now".to_string()))
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::MissingArgument("deg").to_string(),
            "missing argument <deg>"
        );
        assert_eq!(
            ParseError::InvalidJoint("x".to_string()).to_string(),
            "invalid joint 'x'"
        );
    }

    #[test]
    fn test_apply() {
        use crate::{trace::NullTracerInstance, ArmConfig, Canvas};

        let config = ArmConfig::two_link();
        let canvas = Canvas::new(vec![], &config, 32);
        let mut session = Session::new(&config, canvas, NullTracerInstance).unwrap();

        let command = "set 2 -30".parse::<Command>().unwrap();
        assert_eq!(command.apply(&mut session).unwrap(), Outcome::Continue);
        assert!((session.angles().get(1).unwrap().to_degrees() + 30.0).abs() < 1e-9);

        let command = "step 1 -30".parse::<Command>().unwrap();
        assert_eq!(command.apply(&mut session).unwrap(), Outcome::Continue);
        assert!(session.angles().get(0).unwrap().abs() < 1e-9);

        let command = "set 3 10".parse::<Command>().unwrap();
        assert!(matches!(
            command.apply(&mut session),
            Err(Error::UnknownControl(2))
        ));

        assert_eq!(Command::Quit.apply(&mut session).unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_apply_help() {
        use crate::{trace::NullTracerInstance, ArmConfig, Canvas};

        let config = ArmConfig::two_link();
        let canvas = Canvas::new(vec![], &config, 32);
        let mut session = Session::new(&config, canvas, NullTracerInstance).unwrap();
        session.start().unwrap();

        let frame_len = session.surface().get_ref().len();

        assert_eq!(
            Command::Help.apply(&mut session).unwrap(),
            Outcome::Usage(USAGE)
        );
        assert_eq!(session.surface().get_ref().len(), frame_len);
    }
}
