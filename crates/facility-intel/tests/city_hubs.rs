use facility_intel::directory::{
    build_city_hubs, partition, CsvFacilityRepository, FacilityRepository, IntelligenceStore,
    RankingLayout, StatewideOverview,
};

fn load_fixtures() -> (CsvFacilityRepository, IntelligenceStore) {
    let facilities = CsvFacilityRepository::from_reader(
        &include_bytes!("fixtures/facilities.csv")[..],
        "TX",
    )
    .expect("facility fixture loads");
    let intelligence =
        IntelligenceStore::from_reader(&include_bytes!("fixtures/intelligence.json")[..])
            .expect("intelligence fixture loads");
    (facilities, intelligence)
}

#[test]
fn fixture_snapshot_aggregates_into_city_hubs() {
    let (repository, intelligence) = load_fixtures();
    let facilities = repository.active_facilities().expect("facilities load");
    let hubs = build_city_hubs(&facilities, &intelligence);

    let slugs: Vec<&str> = hubs.slugs().collect();
    assert_eq!(slugs, vec!["bryan", "dallas", "houston", "san-antonio"]);
    assert!(hubs.find("Austin").is_none());
    assert!(hubs.find("Tulsa").is_none());

    let houston = hubs.get("houston").expect("houston hub");
    assert_eq!(houston.total_facilities, 3);
    assert_eq!(houston.avg_safety_score, 71);
    assert_eq!(houston.avg_violations, 8.0);

    let san_antonio = hubs.get("san-antonio").expect("san antonio hub");
    assert_eq!(san_antonio.total_facilities, 7);
    assert_eq!(san_antonio.avg_safety_score, 68);
    assert_eq!(san_antonio.avg_violations, 8.4);

    let dallas = hubs.get("dallas").expect("dallas hub");
    assert_eq!(dallas.avg_safety_score, 63);
    assert_eq!(dallas.avg_violations, 9.5);

    let bryan = hubs.get("bryan").expect("city taken from intelligence");
    assert_eq!(bryan.name, "Bryan");
}

#[test]
fn fixture_rankings_follow_city_size() {
    let (repository, intelligence) = load_fixtures();
    let facilities = repository.active_facilities().expect("facilities load");
    let hubs = build_city_hubs(&facilities, &intelligence);

    let houston = hubs.get("houston").expect("houston hub");
    match partition(&houston.facilities) {
        RankingLayout::Unified { facilities } => {
            let ids: Vec<&str> = facilities.iter().map(|f| f.id().as_str()).collect();
            assert_eq!(ids, vec!["455001", "455003", "455002"]);
        }
        other => panic!("expected unified list, got {other:?}"),
    }

    let san_antonio = hubs.get("san-antonio").expect("san antonio hub");
    match partition(&san_antonio.facilities) {
        RankingLayout::Split(panels) => {
            let top: Vec<&str> = panels.top.iter().map(|f| f.id().as_str()).collect();
            let worst: Vec<&str> = panels.worst.iter().map(|f| f.id().as_str()).collect();
            assert_eq!(top, vec!["455101", "455102", "455107", "455103"]);
            assert_eq!(worst, vec!["455105", "455106", "455104"]);
            assert_eq!(panels.title, "Top Rated Facilities");
        }
        other => panic!("expected split panels, got {other:?}"),
    }
}

#[test]
fn fixture_statewide_overview() {
    let (repository, intelligence) = load_fixtures();
    let facilities = repository.active_facilities().expect("facilities load");
    let overview = StatewideOverview::from_hubs(&build_city_hubs(&facilities, &intelligence));

    assert_eq!(overview.total_cities, 4);
    assert_eq!(overview.total_facilities, 13);
    assert_eq!(overview.avg_safety_score, Some(69));
    assert_eq!(overview.total_violations, 105);
}
