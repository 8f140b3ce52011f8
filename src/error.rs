use std::fmt;

#[derive(Debug)]
pub enum JoinError {
    Io(std::io::Error),
    Input(String, std::io::Error),
    /// Write failure on a named output file
    Output(String, std::io::Error),
    MissingHeader(String, usize),
    Summary(serde_json::Error),
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::Io(e) => write!(f, "IO error: {}", e),
            JoinError::Input(name, e) => write!(f, "Error reading {}: {}", name, e),
            JoinError::Output(name, e) => write!(f, "Error writing {}: {}", name, e),
            JoinError::MissingHeader(name, line) => write!(
                f,
                "Feature line before any document header at {}:{}",
                name, line
            ),
            JoinError::Summary(e) => write!(f, "Summary error: {}", e),
        }
    }
}

impl std::error::Error for JoinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JoinError::Io(e) | JoinError::Input(_, e) | JoinError::Output(_, e) => Some(e),
            JoinError::Summary(e) => Some(e),
            JoinError::MissingHeader(..) => None,
        }
    }
}

impl From<std::io::Error> for JoinError {
    fn from(err: std::io::Error) -> Self {
        JoinError::Io(err)
    }
}

impl From<serde_json::Error> for JoinError {
    fn from(err: serde_json::Error) -> Self {
        JoinError::Summary(err)
    }
}
