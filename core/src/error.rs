use alloc::string::String;
use thiserror::Error;

use crate::GameScreen;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid rules: {0}")]
    InvalidRules(&'static str),
    #[error("Action needs the {expected:?} screen but the game is on {actual:?}")]
    WrongScreen {
        expected: GameScreen,
        actual: GameScreen,
    },
    #[error("Game already ended, restart to keep playing")]
    AlreadyEnded,
    #[error("Unknown equipment: {0}")]
    UnknownEquipment(String),
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
    #[error("Unknown saloon option: {0}")]
    UnknownSaloonOption(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
