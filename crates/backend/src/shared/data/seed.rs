//! Static sample data the console starts from

use contracts::domain::a001_country::aggregate::{Country, CountryId};
use contracts::domain::a002_state::aggregate::{State, StateId};
use contracts::domain::a003_city::aggregate::{City, CityId};
use contracts::domain::a004_district::aggregate::{District, DistrictId};
use contracts::domain::a005_area::aggregate::{Area, AreaId};
use contracts::domain::a006_colony::aggregate::{Colony, ColonyId};
use contracts::domain::common::{AuditHistory, AuditInfo, BaseAggregate, HistoryEntry};
use once_cell::sync::Lazy;
use uuid::Uuid;

use super::collections::GeoCollections;

/// Source of the initial collections
pub trait SeedProvider {
    fn load(&self) -> GeoCollections;
}

/// Audit block shared by every seeded record
static SEED_AUDIT: Lazy<AuditInfo> = Lazy::new(|| AuditInfo {
    created_by: "admin".to_string(),
    created_date: "2024-01-15".to_string(),
    updated_by: "admin".to_string(),
    updated_date: "2024-01-15".to_string(),
});

static SEED: Lazy<GeoCollections> = Lazy::new(build);

/// Built-in sample arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSeed;

impl SeedProvider for StaticSeed {
    fn load(&self) -> GeoCollections {
        SEED.clone()
    }
}

// Stable ids: level in the high bits, running number in the low bits.
fn seed_id(level: u128, n: u128) -> Uuid {
    Uuid::from_u128((level << 64) | n)
}

fn history(updated: Option<&str>) -> AuditHistory {
    let mut history = AuditHistory::new();
    history.append(
        HistoryEntry::new(1, "Created", "admin", "2024-01-15 09:00")
            .with_details("Imported from reference dataset"),
    );
    if let Some(details) = updated {
        history.append(
            HistoryEntry::new(2, "Updated", "editor", "2024-02-20 14:30").with_details(details),
        );
    }
    history
}

fn base<Id>(id: Id, full_name: &str, short_name: &str) -> BaseAggregate<Id> {
    BaseAggregate::new(id, full_name, short_name, SEED_AUDIT.clone()).with_history(history(None))
}

fn build() -> GeoCollections {
    let countries = vec![
        Country::new(base(CountryId(seed_id(1, 1)), "United States", "US"), "840"),
        Country::new(base(CountryId(seed_id(1, 2)), "India", "IN"), "356"),
    ];

    let states = vec![
        State::new(base(StateId(seed_id(2, 1)), "California", "CA"), "US", "06", "10", "415"),
        State::new(base(StateId(seed_id(2, 2)), "New York", "NY"), "US", "36", "11", "212"),
        State::new(base(StateId(seed_id(2, 3)), "Karnataka", "KA"), "IN", "29", "29", "080"),
        State::new(base(StateId(seed_id(2, 4)), "Maharashtra", "MH"), "IN", "27", "27", "022"),
    ];

    let cities = vec![
        City::new(base(CityId(seed_id(3, 1)), "San Francisco", "SF"), "CA", "US", "SF01"),
        City::new(base(CityId(seed_id(3, 2)), "Los Angeles", "LA"), "CA", "US", "LA01"),
        City::new(base(CityId(seed_id(3, 3)), "New York City", "NYC"), "NY", "US", "NYC1"),
        City::new(base(CityId(seed_id(3, 4)), "Bengaluru", "BLR"), "KA", "IN", "BLR1"),
        City::new(base(CityId(seed_id(3, 5)), "Mumbai", "MUM"), "MH", "IN", "MUM1"),
    ];

    let districts = vec![
        District::new(base(DistrictId(seed_id(4, 1)), "Central Business District", "CBD"), "SF", "CA", "US"),
        District::new(base(DistrictId(seed_id(4, 2)), "Mission", "MSN"), "SF", "CA", "US"),
        District::new(base(DistrictId(seed_id(4, 3)), "Downtown Los Angeles", "DTLA"), "LA", "CA", "US"),
        District::new(base(DistrictId(seed_id(4, 4)), "Manhattan", "MAN"), "NYC", "NY", "US"),
        District::new(base(DistrictId(seed_id(4, 5)), "Bengaluru Urban", "BLRU"), "BLR", "KA", "IN"),
        District::new(base(DistrictId(seed_id(4, 6)), "Mumbai City", "MUMC"), "MUM", "MH", "IN"),
    ];

    let mut areas = vec![
        Area::new(base(AreaId(seed_id(5, 1)), "Gateway Heights", "GWH"), "CBD", "SF", "CA", "US", "94111"),
        Area::new(base(AreaId(seed_id(5, 2)), "Financial District", "FIN"), "CBD", "SF", "CA", "US", "94104"),
        Area::new(base(AreaId(seed_id(5, 3)), "Mission Dolores", "MSD"), "MSN", "SF", "CA", "US", "94114"),
        Area::new(base(AreaId(seed_id(5, 4)), "Bunker Hill", "BKR"), "DTLA", "LA", "CA", "US", "90071"),
        Area::new(base(AreaId(seed_id(5, 5)), "Midtown", "MID"), "MAN", "NYC", "NY", "US", "10018"),
        Area::new(base(AreaId(seed_id(5, 6)), "MG Road", "MGR"), "BLRU", "BLR", "KA", "IN", "560001"),
        Area::new(base(AreaId(seed_id(5, 7)), "Colaba", "CLB"), "MUMC", "MUM", "MH", "IN", "400005"),
    ];
    areas[5].base.history = history(Some("Pin code corrected"));
    areas[6].base.is_active = false;

    let colonies = vec![
        Colony::new(base(ColonyId(seed_id(6, 1)), "Gateway Terrace", "GWT"), "GWH", "CBD", "SF", "CA", "US"),
        Colony::new(base(ColonyId(seed_id(6, 2)), "Battery Lane", "BTL"), "GWH", "CBD", "SF", "CA", "US"),
        Colony::new(base(ColonyId(seed_id(6, 3)), "Front Street", "FRS"), "FIN", "CBD", "SF", "CA", "US"),
        Colony::new(base(ColonyId(seed_id(6, 4)), "Dolores Park", "DLP"), "MSD", "MSN", "SF", "CA", "US"),
        Colony::new(base(ColonyId(seed_id(6, 5)), "Grand Plaza", "GRP"), "BKR", "DTLA", "LA", "CA", "US"),
        Colony::new(base(ColonyId(seed_id(6, 6)), "Garment Row", "GMR"), "MID", "MAN", "NYC", "NY", "US"),
        Colony::new(base(ColonyId(seed_id(6, 7)), "Brigade Gardens", "BGD"), "MGR", "BLRU", "BLR", "KA", "IN"),
        Colony::new(base(ColonyId(seed_id(6, 8)), "Church Street", "CHS"), "MGR", "BLRU", "BLR", "KA", "IN"),
        Colony::new(base(ColonyId(seed_id(6, 9)), "Cuffe Parade", "CFP"), "CLB", "MUMC", "MUM", "MH", "IN"),
        Colony::new(base(ColonyId(seed_id(6, 10)), "Rincon Court", "RNC"), "", "", "", "", ""),
    ];

    GeoCollections {
        countries,
        states,
        cities,
        districts,
        areas,
        colonies,
    }
}
