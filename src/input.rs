use crate::JoinError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Argument that stands for standard input
pub const STDIN_ARG: &str = "-";

/// A named MegaM input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Stdin,
}

impl Input {
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_ARG {
            Input::Stdin
        } else {
            Input::Path(PathBuf::from(arg))
        }
    }

    /// Name used in progress messages and warnings
    pub fn name(&self) -> String {
        match self {
            Input::Path(path) => path.display().to_string(),
            Input::Stdin => "<stdin>".to_string(),
        }
    }

    /// Open for reading. The reader closes the input when dropped.
    pub fn open(&self) -> Result<Box<dyn BufRead>, JoinError> {
        match self {
            Input::Path(path) => {
                let file = File::open(path).map_err(|e| JoinError::Input(self.name(), e))?;
                Ok(Box::new(BufReader::new(file)))
            }
            Input::Stdin => Ok(Box::new(io::stdin().lock())),
        }
    }
}

impl From<&str> for Input {
    fn from(arg: &str) -> Self {
        Input::from_arg(arg)
    }
}
