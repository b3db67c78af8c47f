use super::config::LayoutConfig;
use crate::graph::{NodeTable, Position};

/// Picks a spot for a new card spawned from `base`.
///
/// Without a base the card goes to the origin. Otherwise it is placed one
/// column to the right, moving one row down if that spot overlaps an
/// existing card.
pub(crate) fn next_position(
    nodes: &NodeTable,
    base: Option<Position>,
    layout: &LayoutConfig,
) -> Position {
    let Some(base) = base else {
        return Position::ORIGIN;
    };

    let beside = Position::new(base.x + layout.offset_x, base.y);
    let overlaps = |candidate: Position| {
        nodes.values().any(|n| {
            (n.position.x - candidate.x).abs() < layout.overlap_radius
                && (n.position.y - candidate.y).abs() < layout.overlap_radius
        })
    };

    if overlaps(beside) {
        Position::new(base.x + layout.offset_x, base.y + layout.offset_y)
    } else {
        beside
    }
}
