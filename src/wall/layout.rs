//! Snake (serpentine) numbering of the panels in a wall, with examples.
//!
//! See [`WallLayout`] for the mapping between grid cells and the order panels are
//! chained on a data or power line, and [`NumberingDirection`] for the four ways
//! that chain can start.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Where the panel chain starts and which axis it snakes along.
///
/// `Left` and `Right` snake across rows (row-major); `Top` and `Bottom` snake
/// down columns (column-major). Every direction reverses at the end of each run.
///
/// ```text
/// 3×2 wall, numbered four ways:
///
///   Left      Right     Top       Bottom
///   1  2  3   3  2  1   1  4  5   2  3  6
///   6  5  4   4  5  6   2  3  6   1  4  5
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingDirection {
    /// Start top-left, first row runs left to right.
    #[default]
    Left,
    /// Start top-right, first row runs right to left.
    Right,
    /// Start top-left, first column runs top to bottom.
    Top,
    /// Start bottom-left, first column runs bottom to top.
    Bottom,
}

impl NumberingDirection {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// True for `Left` and `Right`, which snake across rows.
    #[must_use]
    pub const fn is_row_major(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Short label used in diagrams, such as `L→R`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "L→R",
            Self::Right => "R→L",
            Self::Top => "T→B",
            Self::Bottom => "B→T",
        }
    }

    const fn traversal(self) -> &'static Traversal {
        match self {
            Self::Left => &TRAVERSALS[0],
            Self::Right => &TRAVERSALS[1],
            Self::Top => &TRAVERSALS[2],
            Self::Bottom => &TRAVERSALS[3],
        }
    }
}

impl fmt::Display for NumberingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A panel position. `(0, 0)` is the top-left panel; `row` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row, counted from the top.
    pub row: u32,
    /// Zero-based column, counted from the left.
    pub col: u32,
}

impl Cell {
    /// Cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One-based, as printed on panel labels.
        write!(f, "R{}C{}", self.row + 1, self.col + 1)
    }
}

/// Panel counts of a wall: `horizontal` panels across, `vertical` panels down.
///
/// Both counts are at least one and their product fits in a `u32`, so every
/// sequence number of the wall is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize", into = "RawGridSize")]
pub struct GridSize {
    horizontal: u32,
    vertical: u32,
}

impl GridSize {
    /// Validate and build a grid size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] if either count is zero or the panel count
    /// overflows `u32`.
    pub fn new(horizontal: u32, vertical: u32) -> Result<Self> {
        if horizontal == 0 || vertical == 0 || horizontal.checked_mul(vertical).is_none() {
            return Err(Error::InvalidGrid {
                horizontal,
                vertical,
            });
        }
        Ok(Self {
            horizontal,
            vertical,
        })
    }

    /// Panels across.
    #[must_use]
    pub const fn horizontal(self) -> u32 {
        self.horizontal
    }

    /// Panels down.
    #[must_use]
    pub const fn vertical(self) -> u32 {
        self.vertical
    }

    /// Total number of panels.
    #[must_use]
    pub const fn panel_count(self) -> u32 {
        // Checked in `new`.
        self.horizontal * self.vertical
    }

    /// Whether `cell` lies inside the wall.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.vertical && cell.col < self.horizontal
    }

    /// Every cell, row by row from the top-left.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.vertical).flat_map(move |row| (0..self.horizontal).map(move |col| Cell::new(row, col)))
    }
}

#[derive(Serialize, Deserialize)]
struct RawGridSize {
    horizontal: u32,
    vertical: u32,
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = Error;

    fn try_from(raw: RawGridSize) -> Result<Self> {
        Self::new(raw.horizontal, raw.vertical)
    }
}

impl From<GridSize> for RawGridSize {
    fn from(size: GridSize) -> Self {
        Self {
            horizontal: size.horizontal,
            vertical: size.vertical,
        }
    }
}

/// The three rules of one numbering direction. Cells passed in are in range.
struct Traversal {
    sequence_number: fn(Cell, GridSize) -> u32,
    is_boundary: fn(Cell, GridSize) -> bool,
    cell_at: fn(u32, GridSize) -> Cell,
}

// Order matches `NumberingDirection::traversal`.
const TRAVERSALS: [Traversal; 4] = [
    // Left: even rows left→right, odd rows right→left.
    Traversal {
        sequence_number: |cell, size| {
            let h = size.horizontal;
            if cell.row % 2 == 0 {
                cell.row * h + cell.col + 1
            } else {
                cell.row * h + (h - cell.col)
            }
        },
        is_boundary: |cell, size| {
            (cell.row % 2 == 0 && cell.col == size.horizontal - 1)
                || (cell.row % 2 == 1 && cell.col == 0)
        },
        cell_at: |offset, size| {
            let h = size.horizontal;
            let row = offset / h;
            let step = offset % h;
            let col = if row % 2 == 0 { step } else { h - 1 - step };
            Cell::new(row, col)
        },
    },
    // Right: even rows right→left, odd rows left→right.
    Traversal {
        sequence_number: |cell, size| {
            let h = size.horizontal;
            if cell.row % 2 == 0 {
                cell.row * h + (h - cell.col)
            } else {
                cell.row * h + cell.col + 1
            }
        },
        is_boundary: |cell, size| {
            (cell.row % 2 == 0 && cell.col == 0)
                || (cell.row % 2 == 1 && cell.col == size.horizontal - 1)
        },
        cell_at: |offset, size| {
            let h = size.horizontal;
            let row = offset / h;
            let step = offset % h;
            let col = if row % 2 == 0 { h - 1 - step } else { step };
            Cell::new(row, col)
        },
    },
    // Top: even columns top→bottom, odd columns bottom→top.
    Traversal {
        sequence_number: |cell, size| {
            let v = size.vertical;
            if cell.col % 2 == 0 {
                cell.col * v + cell.row + 1
            } else {
                (cell.col + 1) * v - cell.row
            }
        },
        is_boundary: |cell, size| {
            (cell.col % 2 == 0 && cell.row == size.vertical - 1)
                || (cell.col % 2 == 1 && cell.row == 0)
        },
        cell_at: |offset, size| {
            let v = size.vertical;
            let col = offset / v;
            let step = offset % v;
            let row = if col % 2 == 0 { step } else { v - 1 - step };
            Cell::new(row, col)
        },
    },
    // Bottom: even columns bottom→top, odd columns top→bottom.
    Traversal {
        sequence_number: |cell, size| {
            let v = size.vertical;
            if cell.col % 2 == 0 {
                (cell.col + 1) * v - cell.row
            } else {
                cell.col * v + cell.row + 1
            }
        },
        is_boundary: |cell, size| {
            (cell.col % 2 == 0 && cell.row == 0)
                || (cell.col % 2 == 1 && cell.row == size.vertical - 1)
        },
        cell_at: |offset, size| {
            let v = size.vertical;
            let col = offset / v;
            let step = offset % v;
            let row = if col % 2 == 0 { v - 1 - step } else { step };
            Cell::new(row, col)
        },
    },
];

/// One-based position of `cell` in the snake chain, or `None` if `cell` is outside the wall.
///
/// ```rust
/// use ledwall_kit::wall::layout::{Cell, GridSize, NumberingDirection, sequence_number};
///
/// let size = GridSize::new(2, 3)?;
/// // Column 1 of a top-first wall runs bottom to top.
/// assert_eq!(sequence_number(Cell::new(0, 1), size, NumberingDirection::Top), Some(6));
/// assert_eq!(sequence_number(Cell::new(2, 1), size, NumberingDirection::Top), Some(4));
/// assert_eq!(sequence_number(Cell::new(3, 0), size, NumberingDirection::Top), None);
/// # Ok::<(), ledwall_kit::Error>(())
/// ```
#[must_use]
pub fn sequence_number(cell: Cell, size: GridSize, direction: NumberingDirection) -> Option<u32> {
    size.contains(cell)
        .then(|| (direction.traversal().sequence_number)(cell, size))
}

/// Whether `cell` ends a run, the last panel before the chain doubles back.
///
/// These are the preferred places to end a port or power line. Cells outside the
/// wall are never boundaries.
#[must_use]
pub fn is_boundary(cell: Cell, size: GridSize, direction: NumberingDirection) -> bool {
    size.contains(cell) && (direction.traversal().is_boundary)(cell, size)
}

/// A wall's size together with its numbering direction.
///
/// `WallLayout` maps between grid cells and their one-based position in the snake
/// chain, in both directions.
///
/// ```rust
/// use ledwall_kit::wall::layout::{Cell, GridSize, NumberingDirection, WallLayout};
///
/// let layout = WallLayout::new(GridSize::new(3, 2)?, NumberingDirection::Left);
/// assert_eq!(layout.numbers_by_row(), vec![vec![1, 2, 3], vec![6, 5, 4]]);
/// assert_eq!(layout.cell_at(4), Some(Cell::new(1, 2)));
/// assert!(layout.is_boundary(Cell::new(0, 2)));
/// # Ok::<(), ledwall_kit::Error>(())
/// ```
///
/// ```text
/// 3×2, Left:
///   1  2  3
///   6  5  4
/// Boundaries: 3 (end of row 0) and 6 (end of row 1).
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallLayout {
    size: GridSize,
    direction: NumberingDirection,
}

impl WallLayout {
    /// Layout of a `size` wall numbered from `direction`.
    #[must_use]
    pub const fn new(size: GridSize, direction: NumberingDirection) -> Self {
        Self { size, direction }
    }

    /// The wall size.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// The numbering direction.
    #[must_use]
    pub const fn direction(&self) -> NumberingDirection {
        self.direction
    }

    /// One-based chain position of `cell`, `None` outside the wall.
    #[must_use]
    pub fn sequence_number(&self, cell: Cell) -> Option<u32> {
        sequence_number(cell, self.size, self.direction)
    }

    /// Whether `cell` ends a run of the snake.
    #[must_use]
    pub fn is_boundary(&self, cell: Cell) -> bool {
        is_boundary(cell, self.size, self.direction)
    }

    /// Cell holding one-based chain position `sequence_number`.
    #[must_use]
    pub fn cell_at(&self, sequence_number: u32) -> Option<Cell> {
        if sequence_number == 0 || sequence_number > self.size.panel_count() {
            return None;
        }
        Some((self.direction.traversal().cell_at)(sequence_number - 1, self.size))
    }

    /// Cells in chain order: element `i` is the cell numbered `i + 1`.
    #[must_use]
    pub fn snake_order(&self) -> Vec<Cell> {
        let cell_at = self.direction.traversal().cell_at;
        (0..self.size.panel_count())
            .map(|offset| cell_at(offset, self.size))
            .collect()
    }

    /// Sequence numbers laid out as the wall is seen from the front, top row first.
    #[must_use]
    pub fn numbers_by_row(&self) -> Vec<Vec<u32>> {
        let number = self.direction.traversal().sequence_number;
        (0..self.size.vertical)
            .map(|row| {
                (0..self.size.horizontal)
                    .map(|col| number(Cell::new(row, col), self.size))
                    .collect()
            })
            .collect()
    }
}
