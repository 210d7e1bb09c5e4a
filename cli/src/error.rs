use std::{fmt, io, path::PathBuf};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    InvalidModuleFile(PathBuf),
    ModusError(modus::Error),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::InvalidModuleFile(path) => {
                write!(f, "'{}' is not a module file or directory", path.display())
            }
            CliError::ModusError(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<modus::Error> for CliError {
    fn from(e: modus::Error) -> Self {
        Self::ModusError(e)
    }
}
