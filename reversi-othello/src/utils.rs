//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

/// Format 64 characters into a grid with file letters on top and rank
/// numbers down the side, rank 1 first. `squares` must yield exactly 64 items
/// in index order (A1, B1, ..., H8).
pub fn format_grid<T: Iterator<Item = char>>(mut squares: T, f: &mut Formatter) -> fmt::Result {
    write!(f, "   A B C D E F G H")?;

    for rank in 0..EDGE_LENGTH {
        write!(f, "\n {} ", rank + 1)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, "{} ", squares.next().ok_or(fmt::Error)?)?;
        }
    }

    match squares.next() {
        None => Ok(()),
        Some(_) => Err(fmt::Error),
    }
}
