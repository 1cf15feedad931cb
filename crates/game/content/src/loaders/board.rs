//! Board description loader.
//!
//! A board description is a whitespace separated token stream of elements:
//!
//! ```text
//! V <type> <number> <x> <y>     station with layout position
//! E <type> <v1> <v2>            connection between two declared stations
//! ```
//!
//! The station type is read and ignored. The connection type names a transport
//! kind, either plainly (`taxi`) or as a qualified class name whose last
//! segment carries a `Connection` suffix (`a.b.TaxiConnection`). Any error
//! fails the whole load.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use game_core::{
    ErrorSeverity, GameError, GameGraph, GraphBuilder, GraphError, LayoutPosition, StationId,
    TransportKind,
};

/// Failure to load a board description.
#[derive(Debug, thiserror::Error)]
pub enum LoadFormatError {
    #[error("failed to read board description {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt board description at line {line}")]
    Corrupt {
        line: usize,
        #[source]
        cause: FormatCause,
    },
}

/// What exactly was wrong with a board description.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatCause {
    #[error("illegal element selector {0:?}, must be 'V' or 'E'")]
    UnknownSelector(String),

    #[error("description ended while expecting {0}")]
    UnexpectedEnd(&'static str),

    #[error("{token:?} is not a valid {expected}")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },

    #[error("unknown connection type {0:?}")]
    UnknownConnection(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl LoadFormatError {
    /// Line the error was found on, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Corrupt { line, .. } => Some(*line),
        }
    }
}

impl GameError for LoadFormatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io { .. } => ErrorSeverity::Fatal,
            Self::Corrupt { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "BOARD_IO",
            Self::Corrupt { cause, .. } => match cause {
                FormatCause::UnknownSelector(_) => "BOARD_UNKNOWN_SELECTOR",
                FormatCause::UnexpectedEnd(_) => "BOARD_UNEXPECTED_END",
                FormatCause::InvalidNumber { .. } => "BOARD_INVALID_NUMBER",
                FormatCause::UnknownConnection(_) => "BOARD_UNKNOWN_CONNECTION",
                FormatCause::Graph(inner) => inner.error_code(),
            },
        }
    }
}

/// Loader for board descriptions.
pub struct BoardLoader;

impl BoardLoader {
    pub fn load(path: &Path) -> Result<GameGraph, LoadFormatError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            stations = graph.station_count(),
            connections = graph.connection_count(),
            "board loaded"
        );
        Ok(graph)
    }

    pub fn parse(content: &str) -> Result<GameGraph, LoadFormatError> {
        let mut tokens = Tokens::new(content);
        let mut builder = GraphBuilder::new();

        while let Some((line, selector)) = tokens.next_token() {
            Self::element(&mut tokens, &mut builder, selector)
                .map_err(|cause| LoadFormatError::Corrupt { line, cause })?;
        }
        Ok(builder.build())
    }

    fn element(
        tokens: &mut Tokens<'_>,
        builder: &mut GraphBuilder,
        selector: &str,
    ) -> Result<(), FormatCause> {
        match selector {
            "V" => {
                tokens.expect("station type")?;
                let number = StationId(tokens.number("station number")?);
                let x = tokens.number("x coordinate")?;
                let y = tokens.number("y coordinate")?;
                builder.add_station(number, LayoutPosition::new(x, y))?;
            }
            "E" => {
                let kind = parse_connection_kind(tokens.expect("connection type")?)?;
                let a = StationId(tokens.number("station number")?);
                let b = StationId(tokens.number("station number")?);
                builder.add_connection(kind, a, b)?;
            }
            other => return Err(FormatCause::UnknownSelector(other.to_string())),
        }
        Ok(())
    }
}

fn parse_connection_kind(token: &str) -> Result<TransportKind, FormatCause> {
    let name = token.rsplit('.').next().unwrap_or(token);
    let name = name.strip_suffix("Connection").unwrap_or(name);
    TransportKind::from_str(name).map_err(|_| FormatCause::UnknownConnection(token.to_string()))
}

/// Whitespace separated tokens with their 1-based line numbers.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let inner = content
            .lines()
            .enumerate()
            .flat_map(|(index, line)| line.split_whitespace().map(move |token| (index + 1, token)));
        Self {
            inner: Box::new(inner),
        }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next()
    }

    fn expect(&mut self, what: &'static str) -> Result<&'a str, FormatCause> {
        self.next_token()
            .map(|(_, token)| token)
            .ok_or(FormatCause::UnexpectedEnd(what))
    }

    fn number<T: FromStr>(&mut self, what: &'static str) -> Result<T, FormatCause> {
        let token = self.expect(what)?;
        token.parse().map_err(|_| FormatCause::InvalidNumber {
            token: token.to_string(),
            expected: what,
        })
    }
}
