use std::{error, fmt};

/// What can go wrong talking to the map.
#[derive(Clone, PartialEq)]
pub enum MapError {
    /// No lane has this ID. Expected during normal operation.
    LaneNotFound(String),
    /// The road network couldn't be loaded. Nothing can be answered without it, and it won't be
    /// retried.
    Init(String),
}

impl MapError {
    /// A non-zero status code for callers that want one. Success is 0.
    pub fn code(&self) -> i32 {
        match self {
            MapError::LaneNotFound(_) => -1,
            MapError::Init(_) => -2,
        }
    }

    /// Converts a load failure, keeping the whole chain of context.
    pub fn init(err: anyhow::Error) -> MapError {
        MapError::Init(format!("{:#}", err))
    }
}

/// 0 for success, otherwise the error's code.
pub fn status_code<T>(result: &Result<T, MapError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapError::LaneNotFound(id) => write!(f, "no lane {}", id),
            MapError::Init(msg) => write!(f, "couldn't load the road network: {}", msg),
        }
    }
}

impl fmt::Debug for MapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Do the same thing as the Display trait
        write!(f, "{}", self)
    }
}

impl error::Error for MapError {}
