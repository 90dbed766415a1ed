//! Link/unlink of records between parent and child collections
//!
//! Linking writes the parent's `shortName` into the candidate's key for the
//! parent level and copies every higher ancestor key from the parent, so the
//! candidate's chain always matches its new parent. Unlinking clears the
//! direct key only; what happens to the higher keys is an [`UnlinkPolicy`].
//!
//! All operations update the matching element of the collection in place and
//! leave every other element and the ordering untouched.

use serde::{Deserialize, Serialize};

use super::hierarchy::{Hierarchical, Level};
use super::list_query::Searchable;
use crate::domain::common::AggregateRoot;

/// What `unlink` does with the ancestor keys above the cleared one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlinkPolicy {
    /// Leave higher keys as they were (stale chain)
    #[default]
    KeepAncestors,
    /// Clear every higher key as well
    ClearChain,
}

/// Result of a link or unlink call
#[derive(Debug, Clone, PartialEq)]
pub enum LinkOutcome<T> {
    Linked(T),
    Unlinked(T),
    /// Candidate already points at the target; nothing changed
    AlreadyLinked,
    /// Candidate does not point at the target; nothing changed
    NotLinked,
    /// No candidate with that id
    NotFound,
    /// The acting record has no parent to share
    NoParent,
    /// A record cannot be its own sibling
    SelfLink,
}

impl<T> LinkOutcome<T> {
    /// `true` when the collection was modified
    pub fn is_change(&self) -> bool {
        matches!(self, LinkOutcome::Linked(_) | LinkOutcome::Unlinked(_))
    }

    pub fn record(&self) -> Option<&T> {
        match self {
            LinkOutcome::Linked(r) | LinkOutcome::Unlinked(r) => Some(r),
            _ => None,
        }
    }
}

/// Parent a candidate gets attached to: its level, `shortName` and the
/// ancestor keys above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub level: Level,
    pub short_name: String,
    /// Ancestor keys of the target, nearest first
    pub ancestors: Vec<(Level, String)>,
}

impl LinkTarget {
    /// Target built from the parent record itself
    pub fn from_record<P: Hierarchical + AggregateRoot>(parent: &P) -> Self {
        Self {
            level: P::LEVEL,
            short_name: parent.short_name().to_string(),
            ancestors: chain_of(parent, P::LEVEL),
        }
    }

    /// Parent of `acting` as recorded on `acting`; `None` when unset
    pub fn parent_of<A: Hierarchical>(acting: &A) -> Option<Self> {
        let level = A::LEVEL.parent()?;
        let short_name = acting.chosen(level)?;
        Some(Self {
            level,
            short_name: short_name.to_string(),
            ancestors: chain_of(acting, level),
        })
    }

    pub fn is_parent_of<T: Hierarchical>(&self, candidate: &T) -> bool {
        candidate.parent_key(self.level) == Some(self.short_name.as_str())
    }

    /// Write the whole chain onto `candidate`
    pub fn apply<T: Hierarchical>(&self, candidate: &mut T) {
        candidate.set_parent_key(self.level, &self.short_name);
        for (level, value) in &self.ancestors {
            candidate.set_parent_key(*level, value);
        }
    }
}

fn chain_of<R: Hierarchical>(record: &R, above: Level) -> Vec<(Level, String)> {
    above
        .ancestors()
        .iter()
        .map(|level| (*level, record.parent_key(*level).unwrap_or_default().to_string()))
        .collect()
}

fn position<T: AggregateRoot>(items: &[T], id: T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Attach the candidate to `target`, propagating the full ancestor chain
pub fn link_child<T>(items: &mut [T], candidate_id: T::Id, target: &LinkTarget) -> LinkOutcome<T>
where
    T: Hierarchical + AggregateRoot,
{
    debug_assert!(target.level.is_ancestor_of(T::LEVEL));

    let Some(index) = position(items, candidate_id) else {
        return LinkOutcome::NotFound;
    };
    let candidate = &mut items[index];
    if target.is_parent_of(&*candidate) {
        return LinkOutcome::AlreadyLinked;
    }
    target.apply(candidate);
    LinkOutcome::Linked(candidate.clone())
}

/// Detach the candidate from `target` by clearing its key for `target.level`
pub fn unlink_child<T>(
    items: &mut [T],
    candidate_id: T::Id,
    target: &LinkTarget,
    policy: UnlinkPolicy,
) -> LinkOutcome<T>
where
    T: Hierarchical + AggregateRoot,
{
    let Some(index) = position(items, candidate_id) else {
        return LinkOutcome::NotFound;
    };
    let candidate = &mut items[index];
    if !target.is_parent_of(&*candidate) {
        return LinkOutcome::NotLinked;
    }
    candidate.set_parent_key(target.level, "");
    if policy == UnlinkPolicy::ClearChain {
        for level in target.level.ancestors() {
            candidate.set_parent_key(*level, "");
        }
    }
    LinkOutcome::Unlinked(candidate.clone())
}

/// Move a same-level candidate under the acting record's parent
pub fn link_sibling<T>(items: &mut [T], candidate_id: T::Id, acting: &T) -> LinkOutcome<T>
where
    T: Hierarchical + AggregateRoot,
{
    if candidate_id == acting.id() {
        return LinkOutcome::SelfLink;
    }
    match LinkTarget::parent_of(acting) {
        Some(target) => link_child(items, candidate_id, &target),
        None => LinkOutcome::NoParent,
    }
}

/// Take a same-level candidate away from the acting record's parent
pub fn unlink_sibling<T>(
    items: &mut [T],
    candidate_id: T::Id,
    acting: &T,
    policy: UnlinkPolicy,
) -> LinkOutcome<T>
where
    T: Hierarchical + AggregateRoot,
{
    if candidate_id == acting.id() {
        return LinkOutcome::SelfLink;
    }
    match LinkTarget::parent_of(acting) {
        Some(target) => unlink_child(items, candidate_id, &target, policy),
        None => LinkOutcome::NoParent,
    }
}

/// Records currently attached to `target`
pub fn linked_to<'a, T: Hierarchical>(items: &'a [T], target: &LinkTarget) -> Vec<&'a T> {
    items.iter().filter(|item| target.is_parent_of(*item)).collect()
}

/// Search-to-link: records not yet attached to `target` whose link-search
/// fields contain `term` (case-insensitive). A blank term finds nothing.
pub fn link_candidates<'a, T>(items: &'a [T], target: &LinkTarget, term: &str) -> Vec<&'a T>
where
    T: Hierarchical + Searchable,
{
    items
        .iter()
        .filter(|item| !target.is_parent_of(*item) && item.matches_link_filter(term))
        .collect()
}

/// Search-to-link for siblings of `acting`; never offers `acting` itself
pub fn sibling_candidates<'a, T>(items: &'a [T], acting: &T, term: &str) -> Vec<&'a T>
where
    T: Hierarchical + AggregateRoot + Searchable,
{
    match LinkTarget::parent_of(acting) {
        Some(target) => link_candidates(items, &target, term)
            .into_iter()
            .filter(|item| item.id() != acting.id())
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_state::aggregate::{State, StateId};
    use crate::domain::a005_area::aggregate::{Area, AreaId};
    use crate::domain::a006_colony::aggregate::{Colony, ColonyId};
    use crate::domain::common::{AggregateId, AuditInfo, BaseAggregate};

    fn gwh() -> Area {
        Area::new(
            BaseAggregate::new(AreaId::generate(), "Gateway Heights", "GWH", AuditInfo::default()),
            "CBD",
            "SF",
            "CA",
            "US",
            "94111",
        )
    }

    fn colony(short: &str, chain: [&str; 5]) -> Colony {
        Colony::new(
            BaseAggregate::new(ColonyId::generate(), short, short, AuditInfo::default()),
            chain[0],
            chain[1],
            chain[2],
            chain[3],
            chain[4],
        )
    }

    fn chain(c: &Colony) -> [&str; 5] {
        [&c.area, &c.district, &c.city, &c.state, &c.country].map(String::as_str)
    }

    #[test]
    fn test_link_propagates_full_chain() {
        let mut items = vec![colony("Rincon Court", ["", "", "", "", ""])];
        let id = items[0].id();
        let target = LinkTarget::from_record(&gwh());

        let outcome = link_child(&mut items, id, &target);
        let updated = outcome.record().cloned().unwrap();
        assert_eq!(chain(&updated), ["GWH", "CBD", "SF", "CA", "US"]);
        assert_eq!(items[0], updated);
    }

    #[test]
    fn test_link_is_idempotent() {
        let mut once = vec![colony("A", ["", "", "", "", ""]), colony("B", ["X", "", "", "", ""])];
        let id = once[0].id();
        let mut twice = once.clone();
        let target = LinkTarget::from_record(&gwh());

        link_child(&mut once, id, &target);
        link_child(&mut twice, id, &target);
        let second = link_child(&mut twice, id, &target);
        assert_eq!(second, LinkOutcome::AlreadyLinked);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unlink_keeps_ancestors_and_relink_restores() {
        let original = colony("A", ["GWH", "CBD", "SF", "CA", "US"]);
        let mut items = vec![colony("other", ["MSD", "MSN", "SF", "CA", "US"]), original.clone()];
        let id = original.id();
        let target = LinkTarget::from_record(&gwh());

        let outcome = unlink_child(&mut items, id, &target, UnlinkPolicy::KeepAncestors);
        assert!(outcome.is_change());
        assert_eq!(chain(&items[1]), ["", "CBD", "SF", "CA", "US"]);

        link_child(&mut items, id, &target);
        assert_eq!(items[1], original);
        // the other element is untouched and order kept
        assert_eq!(items[0].short_name(), "other");
    }

    #[test]
    fn test_unlink_clear_chain_policy() {
        let mut items = vec![colony("A", ["GWH", "CBD", "SF", "CA", "US"])];
        let id = items[0].id();
        let target = LinkTarget::from_record(&gwh());
        unlink_child(&mut items, id, &target, UnlinkPolicy::ClearChain);
        assert_eq!(chain(&items[0]), ["", "", "", "", ""]);
    }

    #[test]
    fn test_unlink_from_other_parent_is_refused() {
        let mut items = vec![colony("A", ["MSD", "MSN", "SF", "CA", "US"])];
        let id = items[0].id();
        let target = LinkTarget::from_record(&gwh());
        let before = items.clone();
        assert_eq!(
            unlink_child(&mut items, id, &target, UnlinkPolicy::KeepAncestors),
            LinkOutcome::NotLinked
        );
        assert_eq!(items, before);
    }

    #[test]
    fn test_unknown_candidate_is_a_silent_no_op() {
        let mut items = vec![colony("A", ["", "", "", "", ""])];
        let before = items.clone();
        let target = LinkTarget::from_record(&gwh());
        assert_eq!(
            link_child(&mut items, ColonyId::generate(), &target),
            LinkOutcome::NotFound
        );
        assert_eq!(items, before);
    }

    #[test]
    fn test_link_sibling_takes_acting_parent_chain() {
        let acting = gwh();
        let mut areas = vec![
            acting.clone(),
            Area::new(
                BaseAggregate::new(AreaId::generate(), "Midtown", "MID", AuditInfo::default()),
                "MAN",
                "NYC",
                "NY",
                "US",
                "10018",
            ),
        ];
        let candidate = areas[1].id();

        let outcome = link_sibling(&mut areas, candidate, &acting);
        assert!(outcome.is_change());
        assert_eq!(
            [&areas[1].district, &areas[1].city, &areas[1].state, &areas[1].country],
            ["CBD", "SF", "CA", "US"]
        );
        assert_eq!(areas[1].pin_code, "10018");

        assert_eq!(link_sibling(&mut areas, acting.id(), &acting), LinkOutcome::SelfLink);

        let outcome = unlink_sibling(&mut areas, candidate, &acting, UnlinkPolicy::KeepAncestors);
        assert!(outcome.is_change());
        assert_eq!(areas[1].district, "");
        assert_eq!(areas[1].city, "SF");
    }

    #[test]
    fn test_sibling_without_parent() {
        let mut orphan = State::new(
            BaseAggregate::new(StateId::generate(), "Nowhere", "NW", AuditInfo::default()),
            "",
            "10",
            "10",
            "10",
        );
        let mut states = vec![orphan.clone()];
        let candidate = states[0].id();
        orphan.base.id = StateId::generate();
        assert_eq!(
            link_sibling(&mut states, candidate, &orphan),
            LinkOutcome::NoParent
        );
        assert!(sibling_candidates(&states, &orphan, "no").is_empty());
    }

    #[test]
    fn test_link_candidates_exclude_linked_and_need_term() {
        let items = vec![
            colony("Rincon Court", ["", "", "", "", ""]),
            colony("Gateway Terrace", ["GWH", "CBD", "SF", "CA", "US"]),
            colony("Rincon Hill", ["MSD", "MSN", "SF", "CA", "US"]),
        ];
        let target = LinkTarget::from_record(&gwh());

        let found: Vec<&str> = link_candidates(&items, &target, "RINCON")
            .iter()
            .map(|c| c.short_name())
            .collect();
        assert_eq!(found, vec!["Rincon Court", "Rincon Hill"]);
        assert!(link_candidates(&items, &target, "gateway").is_empty());
        assert!(link_candidates(&items, &target, "  ").is_empty());
        assert_eq!(linked_to(&items, &target).len(), 1);
    }

    #[test]
    fn test_parent_of_reads_acting_chain() {
        let target = LinkTarget::parent_of(&gwh()).unwrap();
        assert_eq!(target.level, Level::District);
        assert_eq!(target.short_name, "CBD");
        assert_eq!(
            target.ancestors,
            vec![
                (Level::City, "SF".to_string()),
                (Level::State, "CA".to_string()),
                (Level::Country, "US".to_string()),
            ]
        );
    }
}
