use chrono::{DateTime, Duration, Utc};
use contracts::domain::common::AggregateId;
use contracts::shared::cascade;
use contracts::shared::hierarchy::Level;
use contracts::shared::link::{self, LinkOutcome, LinkTarget, UnlinkPolicy};
use contracts::shared::metadata::{validate, ValidationErrors};

use super::feedback::Feedback;
use crate::shared::config::Config;
use crate::shared::data::store::short_name_taken;
use crate::shared::data::{ChangeSet, GeoCollections, GeoStore, Repository, StoreError, Stored};

/// Settings an edit session runs with
#[derive(Debug, Clone, PartialEq)]
pub struct EditSettings {
    pub operator: String,
    pub feedback_ttl: Duration,
    pub unlink_policy: UnlinkPolicy,
    pub stamp_audit_on_save: bool,
}

impl EditSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            operator: config.console.operator.clone(),
            feedback_ttl: Duration::seconds(config.console.feedback_ttl_secs as i64),
            unlink_policy: config.editing.unlink_policy,
            stamp_audit_on_save: config.editing.stamp_audit_on_save,
        }
    }
}

impl Default for EditSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Edit form of one record
///
/// The session works on its own copy of every collection. Link and unlink
/// calls change that copy only and remember which records they changed;
/// `save` writes the record and those records back to the store at once,
/// `cancel` throws the copy away.
#[derive(Debug, Clone)]
pub struct EditSession<T: Stored> {
    record: T,
    is_new: bool,
    working: GeoCollections,
    changes: ChangeSet,
    errors: ValidationErrors,
    feedback: Option<Feedback>,
    settings: EditSettings,
}

impl<T: Stored> EditSession<T> {
    /// Edit an existing record
    pub fn open(store: &GeoStore, id: T::Id, settings: EditSettings) -> Result<Self, StoreError> {
        let record: T = store.get_by_id(id).ok_or_else(|| StoreError::NotFound {
            entity: T::element_name(),
            id: id.as_string(),
        })?;
        tracing::debug!("Editing {} {}", T::element_name(), record.short_name());
        Ok(Self::with_record(store, record, false, settings))
    }

    /// "Add": empty record with a fresh id and a seeded audit block
    pub fn open_new(store: &GeoStore, settings: EditSettings, now: DateTime<Utc>) -> Self {
        let record = T::new_for_insert(&settings.operator, now);
        Self::with_record(store, record, true, settings)
    }

    fn with_record(store: &GeoStore, record: T, is_new: bool, settings: EditSettings) -> Self {
        Self {
            record,
            is_new,
            working: store.snapshot(),
            changes: ChangeSet::new(),
            errors: ValidationErrors::new(),
            feedback: None,
            settings,
        }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut T {
        &mut self.record
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Errors of the last failed save
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Levels with records changed by link calls since the last save
    pub fn touched(&self) -> Vec<Level> {
        self.changes.levels()
    }

    /// Form input; `false` for an unknown field
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        self.record.set_field(field, value)
    }

    pub fn toggle_active(&mut self) {
        self.record.base_mut().toggle_active();
    }

    /// Dropdown options for the parent-key field of level `A`
    pub fn options_for<A: Stored>(&self) -> Vec<&A> {
        let options = cascade::options_for(A::LEVEL, &self.record, A::items(&self.working));
        tracing::debug!(
            "{} options for {} form: {}",
            A::element_name(),
            T::element_name(),
            options.len()
        );
        options
    }

    // ============================================================================
    // Children
    // ============================================================================

    /// Link target for records below this one; `None` while the record has no
    /// `shortName` to hand out
    fn target_for<C: Stored>(&self) -> Option<LinkTarget> {
        if !T::LEVEL.is_ancestor_of(C::LEVEL) || self.record.short_name().trim().is_empty() {
            return None;
        }
        Some(LinkTarget::from_record(&self.record))
    }

    pub fn linked_children<C: Stored>(&self) -> Vec<&C> {
        match self.target_for::<C>() {
            Some(target) => link::linked_to(C::items(&self.working), &target),
            None => Vec::new(),
        }
    }

    /// Search-to-link candidates among the records of level `C`
    pub fn child_candidates<C: Stored>(&self, term: &str) -> Vec<&C> {
        match self.target_for::<C>() {
            Some(target) => link::link_candidates(C::items(&self.working), &target, term),
            None => Vec::new(),
        }
    }

    pub fn link_child<C: Stored>(&mut self, id: C::Id, now: DateTime<Utc>) -> LinkOutcome<C> {
        let Some(target) = self.target_for::<C>() else {
            tracing::warn!(
                "{} cannot take {} children without a short name",
                T::element_name(),
                C::element_name()
            );
            return LinkOutcome::NoParent;
        };
        let outcome = link::link_child(C::items_mut(&mut self.working), id, &target);
        self.after_link(&outcome, now, "linked");
        outcome
    }

    pub fn unlink_child<C: Stored>(&mut self, id: C::Id, now: DateTime<Utc>) -> LinkOutcome<C> {
        let Some(target) = self.target_for::<C>() else {
            return LinkOutcome::NotLinked;
        };
        let policy = self.settings.unlink_policy;
        let outcome = link::unlink_child(C::items_mut(&mut self.working), id, &target, policy);
        self.after_link(&outcome, now, "unlinked");
        outcome
    }

    // ============================================================================
    // Siblings
    // ============================================================================

    pub fn sibling_candidates(&self, term: &str) -> Vec<&T> {
        link::sibling_candidates(T::items(&self.working), &self.record, term)
    }

    pub fn link_sibling(&mut self, id: T::Id, now: DateTime<Utc>) -> LinkOutcome<T> {
        let outcome = link::link_sibling(T::items_mut(&mut self.working), id, &self.record);
        self.after_link(&outcome, now, "linked");
        outcome
    }

    pub fn unlink_sibling(&mut self, id: T::Id, now: DateTime<Utc>) -> LinkOutcome<T> {
        let policy = self.settings.unlink_policy;
        let outcome =
            link::unlink_sibling(T::items_mut(&mut self.working), id, &self.record, policy);
        self.after_link(&outcome, now, "unlinked");
        outcome
    }

    fn after_link<C: Stored>(&mut self, outcome: &LinkOutcome<C>, now: DateTime<Utc>, verb: &str) {
        match outcome.record() {
            Some(changed) => {
                self.changes.record(changed);
                let message = format!("{} {} {}", C::element_name(), changed.short_name(), verb);
                tracing::info!("{} (pending save of {})", message, T::element_name());
                self.feedback = Some(Feedback::new(message, now, self.settings.feedback_ttl));
            }
            None => tracing::warn!("{} not {}: {}", C::element_name(), verb, outcome_kind(outcome)),
        }
    }

    /// Confirmation message still visible at `now`
    pub fn feedback(&self, now: DateTime<Utc>) -> Option<&str> {
        self.feedback.as_ref().and_then(|f| f.message_at(now))
    }

    // ============================================================================
    // Save / cancel
    // ============================================================================

    /// Validate, then write the record and every record changed by links.
    ///
    /// Only those records are written; everything else in the store is left
    /// as it is. Nothing changes unless the whole save goes through.
    pub fn save(&mut self, store: &mut GeoStore, now: DateTime<Utc>) -> Result<T::Id, SaveError> {
        let mut errors = validate(&self.record);
        if short_name_taken(store.items::<T>(), &self.record) {
            errors.insert("shortName", "Short name is already in use");
        }
        if !errors.is_valid() {
            tracing::info!("{} not saved: {}", T::element_name(), errors);
            self.errors = errors.clone();
            return Err(SaveError::Validation(errors));
        }
        self.errors = ValidationErrors::new();

        let id = self.record.id();
        let exists = Repository::<T>::get_by_id(&*store, id).is_some();
        if !self.is_new && !exists {
            return Err(StoreError::NotFound {
                entity: T::element_name(),
                id: id.as_string(),
            }
            .into());
        }
        if self.is_new && exists {
            return Err(StoreError::DuplicateId {
                entity: T::element_name(),
                id: id.as_string(),
            }
            .into());
        }

        let mut record = self.record.clone();
        if self.settings.stamp_audit_on_save {
            record.stamp_write(&self.settings.operator, now, self.is_new);
        }

        store.commit(&self.working, &self.changes)?;
        if self.is_new {
            Repository::<T>::insert(store, record.clone())?;
        } else {
            Repository::<T>::update(store, record.clone())?;
        }

        let items = T::items_mut(&mut self.working);
        match items.iter_mut().find(|r| r.id() == id) {
            Some(slot) => *slot = record.clone(),
            None => items.push(record.clone()),
        }
        self.record = record;

        tracing::info!(
            "{} {} saved ({}, {} linked records)",
            T::element_name(),
            self.record.short_name(),
            if self.is_new { "created" } else { "updated" },
            self.changes.len()
        );
        self.changes.clear();
        self.is_new = false;
        Ok(id)
    }

    /// Leave the form; pending link changes are dropped
    pub fn cancel(self) {
        if !self.changes.is_empty() {
            tracing::info!(
                "{} edit cancelled, discarding {} linked records",
                T::element_name(),
                self.changes.len()
            );
        }
    }
}

fn outcome_kind<C>(outcome: &LinkOutcome<C>) -> &'static str {
    match outcome {
        LinkOutcome::Linked(_) => "linked",
        LinkOutcome::Unlinked(_) => "unlinked",
        LinkOutcome::AlreadyLinked => "already linked",
        LinkOutcome::NotLinked => "not linked",
        LinkOutcome::NotFound => "not found",
        LinkOutcome::NoParent => "no parent",
        LinkOutcome::SelfLink => "self link",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::StaticSeed;
    use chrono::TimeZone;
    use contracts::domain::a001_country::aggregate::Country;
    use contracts::domain::a002_state::aggregate::State;
    use contracts::domain::a004_district::aggregate::District;
    use contracts::domain::a005_area::aggregate::Area;
    use contracts::domain::a006_colony::aggregate::Colony;
    use contracts::domain::common::AggregateRoot;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    fn store() -> GeoStore {
        GeoStore::seeded(&StaticSeed)
    }

    fn find<T: Stored>(items: &[T], short_name: &str) -> T {
        items
            .iter()
            .find(|r| r.short_name() == short_name)
            .cloned()
            .unwrap()
    }

    fn open<T: Stored>(store: &GeoStore, short_name: &str) -> EditSession<T> {
        let id = find::<T>(store.items::<T>(), short_name).id();
        EditSession::open(store, id, EditSettings::default()).unwrap()
    }

    #[test]
    fn test_invalid_country_is_not_saved() {
        let mut store = store();
        let before = store.collections().clone();
        let mut session = EditSession::<Country>::open_new(&store, EditSettings::default(), now());
        session.set_field("shortName", "FR");
        session.set_field("code", "1");

        let result = session.save(&mut store, now());
        let Err(SaveError::Validation(errors)) = result else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("fullName"), Some("Full name is required"));
        assert_eq!(errors.get("code"), Some("Code must be numeric and at least 2 digits"));
        assert_eq!(session.errors(), &errors);
        assert_eq!(store.collections(), &before);
    }

    #[test]
    fn test_new_country_appended() {
        let mut store = store();
        let mut session = EditSession::<Country>::open_new(&store, EditSettings::default(), now());
        session.set_field("fullName", "France");
        session.set_field("shortName", "FR");
        session.set_field("code", "250");

        let id = session.save(&mut store, now()).unwrap();
        let countries = store.items::<Country>();
        let last = countries.last().unwrap();
        assert_eq!(last.id(), id);
        assert_eq!(last.base.audit.created_by, "admin");
        assert_eq!(last.base.audit.created_date, "2024-06-01");
        assert!(!session.is_new());
    }

    #[test]
    fn test_duplicate_short_name_refused() {
        let mut store = store();
        let mut session = open::<State>(&store, "NY");
        session.set_field("shortName", "CA");
        let result = session.save(&mut store, now());
        assert!(matches!(result, Err(SaveError::Validation(_))));
        assert_eq!(session.errors().get("shortName"), Some("Short name is already in use"));
    }

    #[test]
    fn test_link_colony_propagates_chain_and_feedback() {
        let mut store = store();
        let orphan = find::<Colony>(store.items(), "RNC");
        let mut session = open::<Area>(&store, "GWH");

        let candidates = session.child_candidates::<Colony>("rinc");
        assert_eq!(candidates.len(), 1);

        let outcome = session.link_child::<Colony>(orphan.id(), now());
        let linked = outcome.record().unwrap();
        assert_eq!(linked.area, "GWH");
        assert_eq!(linked.district, "CBD");
        assert_eq!(linked.city, "SF");
        assert_eq!(linked.state, "CA");
        assert_eq!(linked.country, "US");

        assert_eq!(session.feedback(now()), Some("Colony RNC linked"));
        assert_eq!(session.feedback(now() + Duration::seconds(3)), None);
        assert_eq!(session.linked_children::<Colony>().len(), 3);
        // store keeps the old state until save
        assert_eq!(find::<Colony>(store.items(), "RNC").area, "");

        session.save(&mut store, now()).unwrap();
        let stored = find::<Colony>(store.items(), "RNC");
        assert_eq!(stored.area, "GWH");
        assert_eq!(stored.country, "US");
    }

    #[test]
    fn test_link_twice_is_a_noop() {
        let store = store();
        let orphan = find::<Colony>(store.items(), "RNC");
        let mut session = open::<Area>(&store, "GWH");

        assert!(session.link_child::<Colony>(orphan.id(), now()).is_change());
        let after_first = session.linked_children::<Colony>().len();
        assert_eq!(
            session.link_child::<Colony>(orphan.id(), now()),
            LinkOutcome::AlreadyLinked
        );
        assert_eq!(session.linked_children::<Colony>().len(), after_first);
        // already linked records are no candidates
        assert!(session.child_candidates::<Colony>("rincon").is_empty());
    }

    #[test]
    fn test_cancel_discards_links() {
        let store = store();
        let before = store.collections().clone();
        let orphan = find::<Colony>(store.items(), "RNC");
        let mut session = open::<Area>(&store, "GWH");
        session.link_child::<Colony>(orphan.id(), now());
        assert!(session.touched().contains(&Level::Colony));
        session.cancel();
        assert_eq!(store.collections(), &before);
    }

    #[test]
    fn test_unlink_policies() {
        let mut store = store();
        let btl = find::<Colony>(store.items(), "BTL");

        let mut session = open::<Area>(&store, "GWH");
        let outcome = session.unlink_child::<Colony>(btl.id(), now());
        let kept = outcome.record().unwrap();
        assert_eq!(kept.area, "");
        assert_eq!(kept.district, "CBD");
        assert_eq!(session.feedback(now()), Some("Colony BTL unlinked"));
        assert_eq!(
            session.unlink_child::<Colony>(btl.id(), now()),
            LinkOutcome::NotLinked
        );
        session.cancel();

        let settings = EditSettings {
            unlink_policy: UnlinkPolicy::ClearChain,
            ..EditSettings::default()
        };
        let gwh = find::<Area>(store.items(), "GWH");
        let mut session = EditSession::<Area>::open(&store, gwh.id(), settings).unwrap();
        session.unlink_child::<Colony>(btl.id(), now());
        session.save(&mut store, now()).unwrap();
        let cleared = find::<Colony>(store.items(), "BTL");
        assert_eq!(
            (cleared.area.as_str(), cleared.district.as_str(), cleared.country.as_str()),
            ("", "", "")
        );
    }

    #[test]
    fn test_link_sibling_area() {
        let mut store = store();
        let bkr = find::<Area>(store.items(), "BKR");
        let mut session = open::<Area>(&store, "GWH");

        let candidates: Vec<&str> = session
            .sibling_candidates("b")
            .iter()
            .map(|a| a.short_name())
            .collect();
        assert!(candidates.contains(&"BKR"));
        assert!(!candidates.contains(&"GWH"));

        let own_id = session.record().id();
        assert_eq!(session.link_sibling(own_id, now()), LinkOutcome::SelfLink);

        let moved = session.link_sibling(bkr.id(), now());
        assert_eq!(moved.record().unwrap().district, "CBD");
        assert_eq!(moved.record().unwrap().city, "SF");
        session.save(&mut store, now()).unwrap();
        assert_eq!(find::<Area>(store.items(), "BKR").district, "CBD");
    }

    #[test]
    fn test_cascading_options_follow_form() {
        let store = store();
        let mut session = EditSession::<Area>::open_new(&store, EditSettings::default(), now());
        assert_eq!(session.options_for::<District>().len(), store.items::<District>().len());

        session.set_field("city", "SF");
        let names: Vec<&str> = session
            .options_for::<District>()
            .iter()
            .map(|d| d.short_name())
            .collect();
        assert_eq!(names, vec!["CBD", "MSN"]);

        // upper changes leave lower picks alone
        session.set_field("district", "CBD");
        session.set_field("city", "LA");
        assert_eq!(session.record().district, "CBD");
    }

    #[test]
    fn test_stamp_on_save() {
        let mut store = store();
        let settings = EditSettings {
            stamp_audit_on_save: true,
            operator: "editor".into(),
            ..EditSettings::default()
        };
        let us = find::<Country>(store.items(), "US");
        let mut session = EditSession::<Country>::open(&store, us.id(), settings).unwrap();
        session.set_field("fullName", "United States of America");
        session.save(&mut store, now()).unwrap();

        let saved = find::<Country>(store.items(), "US");
        assert_eq!(saved.base.audit.updated_by, "editor");
        assert_eq!(saved.base.audit.updated_date, "2024-06-01");
        assert_eq!(saved.base.audit.created_date, "2024-01-15");
        let latest = saved.base.history.newest_first()[0];
        assert_eq!(latest.action, "Updated");
        assert_eq!(latest.timestamp, "2024-06-01 10:00");
    }

    #[test]
    fn test_save_without_stamp_keeps_audit() {
        let mut store = store();
        let mut session = open::<Country>(&store, "IN");
        session.toggle_active();
        session.save(&mut store, now()).unwrap();
        let saved = find::<Country>(store.items(), "IN");
        assert!(!saved.is_active());
        assert_eq!(saved.base.audit.updated_date, "2024-01-15");
        assert_eq!(saved.base.history.len(), 1);
    }

    #[test]
    fn test_save_of_deleted_record_fails() {
        let mut store = store();
        let mut session = open::<Colony>(&store, "CFP");
        let id = session.record().id();
        assert!(Repository::<Colony>::delete(&mut store, id));
        assert!(matches!(
            session.save(&mut store, now()),
            Err(SaveError::Store(StoreError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_save_keeps_delete_made_meanwhile() {
        let mut store = store();
        let mut session = open::<Colony>(&store, "CFP");
        let gwt = find::<Colony>(store.items(), "GWT").id();
        assert!(crate::domain::a006_colony::service::delete(&mut store, gwt, |_| true).unwrap());

        session.set_field("fullName", "Cuffe Parade East");
        session.save(&mut store, now()).unwrap();

        assert!(Repository::<Colony>::get_by_id(&store, gwt).is_none());
        assert_eq!(find::<Colony>(store.items(), "CFP").full_name(), "Cuffe Parade East");
    }

    #[test]
    fn test_save_keeps_record_inserted_by_other_session() {
        let mut store = store();
        let mut us = open::<Country>(&store, "US");

        let mut other = EditSession::<Country>::open_new(&store, EditSettings::default(), now());
        other.set_field("fullName", "France");
        other.set_field("shortName", "FR");
        other.set_field("code", "250");
        let fr = other.save(&mut store, now()).unwrap();

        us.set_field("fullName", "United States of America");
        us.save(&mut store, now()).unwrap();

        assert!(Repository::<Country>::get_by_id(&store, fr).is_some());
        assert_eq!(
            find::<Country>(store.items(), "US").full_name(),
            "United States of America"
        );
    }

    #[test]
    fn test_short_name_checked_against_live_store() {
        let mut store = store();
        let mut first = EditSession::<Country>::open_new(&store, EditSettings::default(), now());
        let mut second = EditSession::<Country>::open_new(&store, EditSettings::default(), now());
        for session in [&mut first, &mut second] {
            session.set_field("fullName", "Germany");
            session.set_field("shortName", "DE");
            session.set_field("code", "276");
        }

        first.save(&mut store, now()).unwrap();
        assert!(matches!(
            second.save(&mut store, now()),
            Err(SaveError::Validation(_))
        ));
        assert_eq!(second.errors().get("shortName"), Some("Short name is already in use"));
        assert_eq!(
            store.items::<Country>().iter().filter(|c| c.short_name() == "DE").count(),
            1
        );
    }

    #[test]
    fn test_save_refused_when_linked_record_was_deleted() {
        let mut store = store();
        let orphan = find::<Colony>(store.items(), "RNC").id();
        let mut session = open::<Area>(&store, "GWH");
        session.set_field("fullName", "Gateway Heights North");
        assert!(session.link_child::<Colony>(orphan, now()).is_change());

        assert!(Repository::<Colony>::delete(&mut store, orphan));
        let before = store.collections().clone();

        assert!(matches!(
            session.save(&mut store, now()),
            Err(SaveError::Store(StoreError::NotFound { .. }))
        ));
        assert_eq!(store.collections(), &before);
    }
}
