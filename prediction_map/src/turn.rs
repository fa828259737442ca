use std::fmt;

use serde::{Deserialize, Serialize};

/// The turn code reported for lanes that aren't in the map, and the code most lanes carry.
pub const NO_TURN: i32 = 1;

/// The usual interpretation of a lane's turn code. The map keeps the raw code; this is only for
/// callers that want to branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TurnType {
    NoTurn,
    LeftTurn,
    RightTurn,
    UTurn,
}

impl TurnType {
    pub fn from_code(code: i32) -> Option<TurnType> {
        match code {
            1 => Some(TurnType::NoTurn),
            2 => Some(TurnType::LeftTurn),
            3 => Some(TurnType::RightTurn),
            4 => Some(TurnType::UTurn),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TurnType::NoTurn => NO_TURN,
            TurnType::LeftTurn => 2,
            TurnType::RightTurn => 3,
            TurnType::UTurn => 4,
        }
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TurnType::NoTurn => "no turn",
            TurnType::LeftTurn => "left turn",
            TurnType::RightTurn => "right turn",
            TurnType::UTurn => "U-turn",
        };
        write!(f, "{}", name)
    }
}
