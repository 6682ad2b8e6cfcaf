//! Splitting the snake chain into port and power-line runs.
//!
//! [`group`] is a greedy single pass over a chain. Each run takes at most
//! `capacity` items and, whenever the window contains a run boundary (the last
//! panel before the snake doubles back), ends just after the latest one so a
//! cable stays within one row or column. Without a boundary in the window the run
//! is cut at exactly `capacity`.
//!
//! ```text
//! 4×3 wall numbered Left, 6 panels per port:
//!
//!    1  2  3  4      P1: 1-4   (ends at the row edge, 2 slots unused)
//!    8  7  6  5      P2: 5-8
//!    9 10 11 12      P3: 9-12
//! ```
//!
//! [`plan_ports`] and [`plan_power_lines`] apply the grouper to a wall.

use core::num::NonZeroUsize;
use core::ops::Range;

use serde::Serialize;
use tracing::{debug, warn};

use super::CalculationResult;
use super::layout::{Cell, WallLayout};

/// One contiguous run of the chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LineGroup {
    index: usize,
    range: Range<usize>,
}

impl LineGroup {
    /// Zero-based run number; port or line `index + 1` on labels.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Positions of this run in the grouped sequence.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Items in this run.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Always false; runs hold at least one item.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }
}

/// The runs produced by [`group`] and how much of the sequence they cover.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Grouping {
    groups: Vec<LineGroup>,
    sequence_len: usize,
}

impl Grouping {
    /// Runs in chain order.
    #[must_use]
    pub fn groups(&self) -> &[LineGroup] {
        &self.groups
    }

    /// Items placed in some run.
    #[must_use]
    pub fn covered(&self) -> usize {
        self.groups.last().map_or(0, |group| group.range.end)
    }

    /// Items left over after `max_groups` runs were used up.
    #[must_use]
    pub fn uncovered(&self) -> usize {
        self.sequence_len - self.covered()
    }

    /// Length of the sequence that was grouped.
    #[must_use]
    pub const fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    /// Run containing sequence position `position`, if any.
    #[must_use]
    pub fn group_at(&self, position: usize) -> Option<&LineGroup> {
        if position >= self.covered() {
            return None;
        }
        let index = self.groups.partition_point(|group| group.range.end <= position);
        self.groups.get(index)
    }
}

/// Split `sequence` into at most `max_groups` runs of at most `capacity` items.
///
/// `sequence` must already be in chain order. Grouping stops when the sequence is
/// consumed or `max_groups` runs exist; the rest is reported by
/// [`Grouping::uncovered`].
///
/// ```rust
/// use core::num::NonZeroUsize;
/// use ledwall_kit::wall::grouping::group;
///
/// // Boundaries at positions 2 and 5.
/// let boundary = [false, false, true, false, false, true];
/// let positions: Vec<usize> = (0..6).collect();
/// let capacity = NonZeroUsize::new(3).expect("non-zero");
///
/// let grouping = group(&positions, capacity, 16, |&position| boundary[position]);
///
/// let ranges: Vec<_> = grouping.groups().iter().map(|g| g.range()).collect();
/// assert_eq!(ranges, vec![0..3, 3..6]);
/// assert_eq!(grouping.uncovered(), 0);
/// ```
pub fn group<T>(
    sequence: &[T],
    capacity: NonZeroUsize,
    max_groups: usize,
    mut is_boundary: impl FnMut(&T) -> bool,
) -> Grouping {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < sequence.len() && groups.len() < max_groups {
        let window_end = start.saturating_add(capacity.get()).min(sequence.len());
        let end = sequence[start..window_end]
            .iter()
            .rposition(&mut is_boundary)
            .map_or(window_end, |offset| start + offset + 1);
        groups.push(LineGroup {
            index: groups.len(),
            range: start..end,
        });
        start = end;
    }

    Grouping {
        groups,
        sequence_len: sequence.len(),
    }
}

/// A wall's snake chain split into ports or power lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinePlan {
    layout: WallLayout,
    snake: Vec<Cell>,
    grouping: Grouping,
}

impl LinePlan {
    /// Group `layout`'s chain with `capacity` panels per run and at most `max_groups` runs.
    #[must_use]
    pub fn new(layout: WallLayout, capacity: NonZeroUsize, max_groups: usize) -> Self {
        let snake = layout.snake_order();
        let grouping = group(&snake, capacity, max_groups, |&cell| layout.is_boundary(cell));
        Self {
            layout,
            snake,
            grouping,
        }
    }

    /// The layout that was grouped.
    #[must_use]
    pub const fn layout(&self) -> &WallLayout {
        &self.layout
    }

    /// Runs in chain order.
    #[must_use]
    pub fn groups(&self) -> &[LineGroup] {
        self.grouping.groups()
    }

    /// The underlying grouping.
    #[must_use]
    pub const fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Cells of `group`, in chain order.
    #[must_use]
    pub fn cells(&self, group: &LineGroup) -> &[Cell] {
        self.snake.get(group.range()).unwrap_or_default()
    }

    /// Run that `cell` belongs to, `None` if uncovered or outside the wall.
    #[must_use]
    pub fn group_of(&self, cell: Cell) -> Option<&LineGroup> {
        let sequence_number = self.layout.sequence_number(cell)?;
        self.grouping.group_at(sequence_number as usize - 1)
    }

    /// Panels not on any run.
    #[must_use]
    pub fn uncovered(&self) -> usize {
        self.grouping.uncovered()
    }
}

/// Data ports: `panels_per_port` per run, at most one controller's ports.
///
/// Only one controller's worth of ports is laid out; remaining panels are
/// reported by [`LinePlan::uncovered`].
#[must_use]
pub fn plan_ports(layout: WallLayout, result: &CalculationResult) -> LinePlan {
    let plan = LinePlan::new(
        layout,
        result.ports.panels_per_port.as_group_size(),
        result.ports.ports_per_controller as usize,
    );
    if plan.uncovered() > 0 {
        warn!(
            "Port plan: {} of {} panels exceed {} ports on one controller",
            plan.uncovered(),
            result.total_panels,
            result.ports.ports_per_controller
        );
    }
    plan
}

/// Power lines: `panels_per_line` per run, as many runs as the wall needs.
///
/// Every panel is on a line. Runs that end early at row or column ends can make
/// `groups().len()` larger than the summary's `lines_needed`, which is a plain
/// split of the panel count.
#[must_use]
pub fn plan_power_lines(layout: WallLayout, result: &CalculationResult) -> LinePlan {
    let max_groups = usize::try_from(result.total_panels).unwrap_or(usize::MAX);
    let plan = LinePlan::new(layout, result.power_lines.panels_per_line.as_group_size(), max_groups);
    if plan.groups().len() as u64 > result.power_lines.lines_needed {
        debug!(
            "Power plan: {} aligned lines for {} panels ({} by count)",
            plan.groups().len(),
            result.total_panels,
            result.power_lines.lines_needed
        );
    }
    plan
}
