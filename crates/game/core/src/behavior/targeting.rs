//! Choosing whom to hunt.

use super::Situation;
use crate::affinity::is_aggressive;
use crate::env::GridOracle;
use crate::state::{Actor, EntityId};

/// Whether `observer` can currently see `other`: alive, someone else, and on
/// a lit cell of the observer's light field.
pub fn perceives<G>(observer: &Actor, other: &Actor, situation: &Situation<'_, G>) -> bool
where
    G: GridOracle + ?Sized,
{
    other.id != observer.id && other.is_alive() && situation.light.is_lit(other.position)
}

/// Nearest perceived actor the affinity resolver marks as aggressive.
/// Ties go to the lower id.
pub fn nearest_hostile<'a, G>(observer: &Actor, situation: &Situation<'a, G>) -> Option<&'a Actor>
where
    G: GridOracle + ?Sized,
{
    situation
        .actors
        .iter()
        .filter(|other| is_aggressive(observer.faction, other.faction))
        .filter(|other| perceives(observer, other, situation))
        .min_by(|a, b| {
            let da = observer.position.euclidean(a.position);
            let db = observer.position.euclidean(b.position);
            da.total_cmp(&db).then(a.id.cmp(&b.id))
        })
}

/// The actor's remembered target if it is still perceived and hostile.
pub fn tracked_target<'a, G>(observer: &Actor, situation: &Situation<'a, G>) -> Option<&'a Actor>
where
    G: GridOracle + ?Sized,
{
    let id: EntityId = observer.target?;
    situation
        .actors
        .get(id)
        .filter(|other| is_aggressive(observer.faction, other.faction))
        .filter(|other| perceives(observer, other, situation))
}
