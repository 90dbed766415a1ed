//! Fixed parent chain of the geographic hierarchy
//!
//! Country < State < City < District < Area < Colony. A record references each
//! of its ancestors by the ancestor's `shortName`, stored in a field named after
//! the ancestor level ("country", "state", ...).

use serde::{Deserialize, Serialize};

/// Level of the hierarchy, ordered from the root down
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Country,
    State,
    City,
    District,
    Area,
    Colony,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Country,
        Level::State,
        Level::City,
        Level::District,
        Level::Area,
        Level::Colony,
    ];

    /// Name of the field a descendant uses to reference this level
    pub fn field_name(&self) -> &'static str {
        match self {
            Level::Country => "country",
            Level::State => "state",
            Level::City => "city",
            Level::District => "district",
            Level::Area => "area",
            Level::Colony => "colony",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.field_name() == name)
    }

    pub fn depth(&self) -> usize {
        *self as usize
    }

    /// Direct parent level, `None` for Country
    pub fn parent(&self) -> Option<Level> {
        self.depth().checked_sub(1).map(|d| Level::ALL[d])
    }

    /// Direct child level, `None` for Colony
    pub fn child(&self) -> Option<Level> {
        Level::ALL.get(self.depth() + 1).copied()
    }

    /// Ancestor levels, nearest first
    pub fn ancestors(&self) -> &'static [Level] {
        static NEAREST_FIRST: [Level; 5] = [
            Level::Area,
            Level::District,
            Level::City,
            Level::State,
            Level::Country,
        ];
        &NEAREST_FIRST[NEAREST_FIRST.len() - self.depth()..]
    }

    pub fn is_ancestor_of(&self, other: Level) -> bool {
        *self < other
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Foreign-key field names of `level`, nearest ancestor first
pub fn ancestor_fields_of(level: Level) -> Vec<&'static str> {
    level.ancestors().iter().map(Level::field_name).collect()
}

/// Field on a `child` record that holds the `shortName` of its `parent` level
pub fn child_field_of(parent: Level, child: Level) -> Option<&'static str> {
    parent.is_ancestor_of(child).then(|| parent.field_name())
}

/// Read/write access to the denormalized ancestor keys of a record
pub trait Hierarchical {
    /// Level the record lives on
    const LEVEL: Level;

    /// `shortName` the record keeps for its ancestor at `level`.
    /// `None` when `level` is not an ancestor of this record.
    fn parent_key(&self, level: Level) -> Option<&str>;

    /// Overwrite the ancestor key for `level`; returns `false` when the record
    /// has no such field.
    fn set_parent_key(&mut self, level: Level, value: &str) -> bool;

    /// Ancestor key for `level`, only when it is set
    fn chosen(&self, level: Level) -> Option<&str> {
        self.parent_key(level).filter(|v| !v.is_empty())
    }
}
