//! Error types for placement and configuration.
//!
//! [`PlacementError`] covers every way a board operation can be refused.
//! Two groups live in it:
//!
//! - Lifecycle violations ([`PlacementError::InvalidState`],
//!   [`PlacementError::NotPlaced`], unknown ids) mean the caller broke the
//!   drag protocol and should be fixed, not retried.
//! - [`PlacementError::CellOccupied`] and
//!   [`PlacementError::CannotReturnWhileDragging`] are ordinary outcomes of
//!   play; the first routes the block home, the second can be retried once
//!   the gesture ends.

use thiserror::Error;

use slotmatch_core::identifier::{BlockId, CellId};

/// Why a placement-engine operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Invalid state for {block}: {reason}")]
    InvalidState { block: BlockId, reason: &'static str },

    #[error("{cell} is already occupied by {occupant}")]
    CellOccupied { cell: CellId, occupant: BlockId },

    #[error("{0} is not placed in any cell")]
    NotPlaced(BlockId),

    #[error("{0} cannot return home while it is being dragged")]
    CannotReturnWhileDragging(BlockId),

    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("Unknown cell: {0}")]
    UnknownCell(CellId),
}

impl PlacementError {
    /// Returns `true` for errors that are a normal part of play rather than
    /// a broken caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CellOccupied { .. } | Self::CannotReturnWhileDragging(_)
        )
    }
}

/// A cell refused a second occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{cell} is already occupied by {occupant}")]
pub struct AlreadyOccupied {
    pub cell: CellId,
    pub occupant: BlockId,
}

impl From<AlreadyOccupied> for PlacementError {
    fn from(err: AlreadyOccupied) -> Self {
        Self::CellOccupied {
            cell: err.cell,
            occupant: err.occupant,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_occupied_converts_to_cell_occupied() {
        let err = AlreadyOccupied {
            cell: CellId::new(2),
            occupant: BlockId::new(5),
        };
        let placement: PlacementError = err.into();
        assert_eq!(
            placement,
            PlacementError::CellOccupied {
                cell: CellId::new(2),
                occupant: BlockId::new(5),
            }
        );
        assert_eq!(placement.to_string(), "cell-2 is already occupied by block-5");
    }

    #[test]
    fn test_recoverable_errors() {
        let occupied = PlacementError::CellOccupied {
            cell: CellId::new(0),
            occupant: BlockId::new(0),
        };
        assert!(occupied.is_recoverable());
        assert!(
            PlacementError::CannotReturnWhileDragging(BlockId::new(1)).is_recoverable()
        );
        assert!(!PlacementError::NotPlaced(BlockId::new(1)).is_recoverable());
        assert!(
            !PlacementError::InvalidState {
                block: BlockId::new(1),
                reason: "no active drag session",
            }
            .is_recoverable()
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PlacementError::NotPlaced(BlockId::new(3)).to_string(),
            "block-3 is not placed in any cell"
        );
        assert_eq!(
            PlacementError::InvalidState {
                block: BlockId::new(0),
                reason: "a drag session is already active",
            }
            .to_string(),
            "Invalid state for block-0: a drag session is already active"
        );
    }
}
