//! Console command syntax.
use std::str::FromStr;

use game_core::{PlayerId, StationId, TicketKind};

/// One line of console input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    NewMrX,
    NewDetective,
    Remove(PlayerId),
    Up(PlayerId),
    Down(PlayerId),
    Clear,
    NewGame,
    Start,
    Abort,
    Move {
        player: PlayerId,
        station: StationId,
        ticket: TicketKind,
    },
    Double {
        player: PlayerId,
        steps: [(StationId, TicketKind); 2],
    },
    Undo,
    Redo,
    Status,
    Moves,
    Options(PlayerId),
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, try 'help'")]
    UnknownCommand(String),

    #[error("{command}: missing {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("{token:?} is not a valid {what}")]
    InvalidArgument { what: &'static str, token: String },

    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
}

pub const HELP: &str = "\
commands:
  mrx | detective            seat Mr. X / a detective
  remove|up|down <player>    remove or reorder a detective
  clear | new                remove all players / clear the move log
  start | abort              begin or abandon a game
  move <player> <station> <ticket>
  double <player> <station> <ticket> <station> <ticket>
  undo | redo
  status | moves | options <player>
  help | quit";

const NAMES: [&str; 20] = [
    "mrx", "detective", "remove", "up", "down", "clear", "new", "start", "abort", "move",
    "double", "undo", "redo", "status", "moves", "options", "help", "?", "quit", "exit",
];

impl Command {
    /// Parses a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let command = NAMES
            .into_iter()
            .find(|known| known.eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::UnknownCommand(name.to_string()))?;
        let mut args = Args { command, tokens };

        let parsed = match command {
            "mrx" => Self::NewMrX,
            "detective" => Self::NewDetective,
            "remove" => Self::Remove(args.player()?),
            "up" => Self::Up(args.player()?),
            "down" => Self::Down(args.player()?),
            "clear" => Self::Clear,
            "new" => Self::NewGame,
            "start" => Self::Start,
            "abort" => Self::Abort,
            "move" => Self::Move {
                player: args.player()?,
                station: args.station()?,
                ticket: args.ticket()?,
            },
            "double" => {
                let player = args.player()?;
                let first = (args.station()?, args.ticket()?);
                let second = (args.station()?, args.ticket()?);
                Self::Double {
                    player,
                    steps: [first, second],
                }
            }
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "status" => Self::Status,
            "moves" => Self::Moves,
            "options" => Self::Options(args.player()?),
            "help" | "?" => Self::Help,
            _ => Self::Quit,
        };

        if args.tokens.next().is_some() {
            return Err(ParseError::TooManyArguments(command));
        }
        Ok(Some(parsed))
    }
}

struct Args<'a> {
    command: &'static str,
    tokens: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn next<T: FromStr>(&mut self, what: &'static str) -> Result<T, ParseError> {
        let token = self.tokens.next().ok_or(ParseError::MissingArgument {
            command: self.command,
            what,
        })?;
        token.parse().map_err(|_| ParseError::InvalidArgument {
            what,
            token: token.to_string(),
        })
    }

    /// Accepts `3` as well as `#3`.
    fn player(&mut self) -> Result<PlayerId, ParseError> {
        let token = self.tokens.next().ok_or(ParseError::MissingArgument {
            command: self.command,
            what: "player",
        })?;
        token
            .trim_start_matches('#')
            .parse()
            .map(PlayerId)
            .map_err(|_| ParseError::InvalidArgument {
                what: "player",
                token: token.to_string(),
            })
    }

    fn station(&mut self) -> Result<StationId, ParseError> {
        self.next("station").map(StationId)
    }

    fn ticket(&mut self) -> Result<TicketKind, ParseError> {
        self.next("ticket")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(
            Command::parse("move #2 13 taxi").unwrap(),
            Some(Command::Move {
                player: PlayerId(2),
                station: StationId(13),
                ticket: TicketKind::Taxi,
            })
        );
        assert_eq!(
            Command::parse("  DOUBLE 0 4 Black 8 bus ").unwrap(),
            Some(Command::Double {
                player: PlayerId(0),
                steps: [
                    (StationId(4), TicketKind::Black),
                    (StationId(8), TicketKind::Bus)
                ],
            })
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn reports_argument_problems() {
        assert_eq!(
            Command::parse("up"),
            Err(ParseError::MissingArgument {
                command: "up",
                what: "player",
            })
        );
        assert_eq!(
            Command::parse("move 1 2 rocket"),
            Err(ParseError::InvalidArgument {
                what: "ticket",
                token: "rocket".to_string(),
            })
        );
        assert_eq!(
            Command::parse("start now"),
            Err(ParseError::TooManyArguments("start"))
        );
        assert_eq!(
            Command::parse("fly"),
            Err(ParseError::UnknownCommand("fly".to_string()))
        );
    }
}
