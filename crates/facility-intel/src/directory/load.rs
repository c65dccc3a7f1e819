use std::fmt;

/// Failure to read one of the snapshot files backing the directory.
#[derive(Debug)]
pub enum DataLoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLoadError::Io(err) => write!(f, "failed to read data snapshot: {}", err),
            DataLoadError::Csv(err) => write!(f, "invalid facility CSV data: {}", err),
            DataLoadError::Json(err) => write!(f, "invalid intelligence JSON data: {}", err),
        }
    }
}

impl std::error::Error for DataLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataLoadError::Io(err) => Some(err),
            DataLoadError::Csv(err) => Some(err),
            DataLoadError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DataLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DataLoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for DataLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
