use std::io;

#[derive(Debug)]
pub enum GameError {
    /// The grid has no interior cells left once the border ring is drawn.
    InvalidDimension { width: usize, height: usize },
    /// Every interior cell is taken by a wall, the food or the snake.
    NoSpaceAvailable,
    PersistenceUnavailable(io::Error),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidDimension { width, height } => {
                write!(f, "Invalid grid size {}x{}: both sides must be at least 3", width, height)
            }
            GameError::NoSpaceAvailable => write!(f, "No free cell left on the grid"),
            GameError::PersistenceUnavailable(e) => write!(f, "Score file unavailable: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::PersistenceUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::PersistenceUnavailable(e)
    }
}
