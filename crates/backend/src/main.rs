use backend::shared::config::{self, Config};
use backend::shared::data::{GeoStore, StaticSeed, Stored};
use backend::system;
use backend::usecases::u101_browse_list::ListView;
use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_state::aggregate::State;
use contracts::domain::a003_city::aggregate::City;
use contracts::domain::a004_district::aggregate::District;
use contracts::domain::a005_area::aggregate::Area;
use contracts::domain::a006_colony::aggregate::Colony;

fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    tracing::info!(
        "Console settings: page size {}, feedback {}s, unlink policy {:?}",
        config.console.page_size,
        config.console.feedback_ttl_secs,
        config.editing.unlink_policy
    );

    let store = system::initialization::initialize_store(&StaticSeed);

    print_first_page::<Country>(&store, &config);
    print_first_page::<State>(&store, &config);
    print_first_page::<City>(&store, &config);
    print_first_page::<District>(&store, &config);
    print_first_page::<Area>(&store, &config);
    print_first_page::<Colony>(&store, &config);

    Ok(())
}

fn print_first_page<T: Stored>(store: &GeoStore, config: &Config) {
    let page = ListView::<T>::from_config(config).page(store);
    tracing::info!(
        "{}: {} records, page {}/{}",
        T::list_name(),
        page.total_count,
        page.page,
        page.total_pages
    );
    for record in &page.items {
        let status = if record.is_active() { "" } else { " (inactive)" };
        tracing::info!("  {:<6} {}{}", record.short_name(), record.full_name(), status);
    }
}
