//! Neighbor scoring over a desire field.

use crate::desire::DesireField;
use crate::state::Position;

/// Result of scoring the eight neighbors for a hunter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HuntingStep {
    /// Free neighbor with the lowest `desire + distance to goal`.
    pub best_free: Option<Position>,
    /// A blocked neighbor scored strictly better than every free one, or
    /// nothing is free while something is blocked.
    pub blocked: bool,
}

/// Scores each in-bounds neighbor of `origin` by `desire + euclidean distance
/// to goal`. Ties keep the first neighbor in clockwise order from north.
pub fn hunting_step(
    origin: Position,
    goal: Position,
    desire: &DesireField,
    is_free: impl Fn(Position) -> bool,
) -> HuntingStep {
    let mut best_free: Option<(Position, f64)> = None;
    let mut best_blocked: Option<f64> = None;

    for neighbor in origin.neighbors() {
        if !desire.dimensions().contains(neighbor) {
            continue;
        }
        let score = f64::from(desire.value(neighbor)) + neighbor.euclidean(goal);

        if is_free(neighbor) {
            if best_free.is_none_or(|(_, best)| score < best) {
                best_free = Some((neighbor, score));
            }
        } else if best_blocked.is_none_or(|best| score < best) {
            best_blocked = Some(score);
        }
    }

    let blocked = match (best_free, best_blocked) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some((_, free)), Some(blocked)) => blocked < free,
    };

    HuntingStep {
        best_free: best_free.map(|(position, _)| position),
        blocked,
    }
}

/// Free neighbor with the lowest interest, if it is lower than where the
/// actor stands.
pub fn fleeing_step(
    origin: Position,
    desire: &DesireField,
    is_free: impl Fn(Position) -> bool,
) -> Option<Position> {
    let here = desire.interest(origin);
    origin
        .neighbors()
        .filter(|neighbor| desire.dimensions().contains(*neighbor) && is_free(*neighbor))
        .map(|neighbor| (neighbor, desire.interest(neighbor)))
        .fold(None, |best: Option<(Position, u32)>, candidate| match best {
            Some((_, interest)) if interest <= candidate.1 => best,
            _ => Some(candidate),
        })
        .filter(|(_, interest)| *interest < here)
        .map(|(position, _)| position)
}
