// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping between on-screen board coordinates and engine squares
//!
//! The same two functions are used for submitting moves and for placing
//! pieces and legal-move markers, so what is drawn always agrees with what
//! the engine accepts.

use crate::{EngineSquare, UiCoord, BOARD_DIMENSION};

const LAST: u8 = BOARD_DIMENSION - 1;

/// Convert a screen coordinate to the engine square it shows
pub fn to_engine(coord: UiCoord, flipped: bool) -> EngineSquare {
    if flipped {
        EngineSquare::new(LAST - coord.col, coord.row)
    } else {
        EngineSquare::new(coord.col, LAST - coord.row)
    }
}

/// Convert an engine square to where it is shown on screen
pub fn to_ui(square: EngineSquare, flipped: bool) -> UiCoord {
    if flipped {
        UiCoord::new(square.rank, LAST - square.file)
    } else {
        UiCoord::new(LAST - square.rank, square.file)
    }
}
