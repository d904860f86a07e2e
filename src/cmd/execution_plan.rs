use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

pub const PIPE: &str = "|";
pub const READ: &str = "<";
pub const WRITE: &str = ">";

/// How a single input line will be run. Built fresh for every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionPlan {
    /// `args[0]` is both the program looked up on `PATH` and `argv[0]`.
    Simple(Vec<String>),
    Redirected {
        args: Vec<String>,
        redirects: Vec<Redirect>,
    },
    /// `left | right`. Redirect operators inside either stage are ordinary
    /// arguments.
    Piped {
        left: Vec<String>,
        right: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub direction: Direction,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    #[strum(serialize = "<")]
    Input,
    #[strum(serialize = ">")]
    Output,
}

impl Direction {
    fn from_operator(token: &str) -> Option<Self> {
        match token {
            READ => Some(Self::Input),
            WRITE => Some(Self::Output),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandSyntaxError {
    #[error("no command entered")]
    Empty,
    #[error("missing file name after `{0}`")]
    MissingRedirectTarget(Direction),
    #[error("missing command before `|`")]
    EmptyLeftStage,
    #[error("missing command after `|`")]
    EmptyRightStage,
    #[error("only a single `|` is supported")]
    MultiplePipes,
    #[error("redirection without a command")]
    MissingProgram,
}

impl ExecutionPlan {
    /// Classifies a token sequence. A `|` anywhere makes the plan a pipe;
    /// otherwise `<`/`>` make it a redirection; otherwise it is simple.
    pub fn parse(tokens: &[String]) -> Result<Self, CommandSyntaxError> {
        if tokens.is_empty() {
            return Err(CommandSyntaxError::Empty);
        }

        if let Some(split) = tokens.iter().position(|t| t == PIPE) {
            let (left, right) = (&tokens[..split], &tokens[split + 1..]);

            if right.iter().any(|t| t == PIPE) {
                return Err(CommandSyntaxError::MultiplePipes);
            }
            if left.is_empty() {
                return Err(CommandSyntaxError::EmptyLeftStage);
            }
            if right.is_empty() {
                return Err(CommandSyntaxError::EmptyRightStage);
            }

            return Ok(Self::Piped {
                left: left.to_vec(),
                right: right.to_vec(),
            });
        }

        let mut args = Vec::with_capacity(tokens.len());
        let mut redirects = Vec::new();
        let mut tokens = tokens.iter();

        while let Some(token) = tokens.next() {
            match Direction::from_operator(token) {
                Some(direction) => {
                    let path = tokens
                        .next()
                        .ok_or(CommandSyntaxError::MissingRedirectTarget(direction))?;
                    redirects.push(Redirect {
                        direction,
                        path: PathBuf::from(path),
                    });
                }
                None => args.push(token.clone()),
            }
        }

        match (args.is_empty(), redirects.is_empty()) {
            (true, _) => Err(CommandSyntaxError::MissingProgram),
            (false, true) => Ok(Self::Simple(args)),
            (false, false) => Ok(Self::Redirected { args, redirects }),
        }
    }
}
