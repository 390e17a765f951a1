use dogcheck_core::{DogNames, ResultTable, build_record, summarize};

fn reference_names() -> DogNames {
    DogNames::parse(
        "beagle\n\
         walker hound, walker foxhound\n\
         great dane\n\
         boxer\n\
         german shepherd, german shepherd dog, german police dog, alsatian\n",
    )
}

fn pet_table(pairs: &[(&str, &str, &str)], names: &DogNames) -> ResultTable {
    pairs
        .iter()
        .map(|(item, truth, output)| (*item, build_record(truth, output, names)))
        .collect()
}

#[test]
fn summarizes_mixed_batch() {
    let names = reference_names();
    let table = pet_table(
        &[
            ("pet_images/Beagle_01.jpg", "beagle", "beagle"),
            ("pet_images/Great_dane_02.jpg", "great dane", "boxer"),
            (
                "pet_images/German_shepherd_03.jpg",
                "german shepherd",
                "German Shepherd, German Shepherd Dog, German Police Dog, Alsatian",
            ),
            ("pet_images/skunk_04.jpg", "skunk", "skunk, polecat, wood pussy"),
            ("pet_images/cat_05.jpg", "cat", "Egyptian cat"),
            ("pet_images/badger_06.jpg", "badger", "walker hound, walker foxhound"),
        ],
        &names,
    );

    let stats = summarize(&table).expect("summarize batch");
    assert_eq!(stats.n_images, 6);
    assert_eq!(stats.n_dogs, 3);
    assert_eq!(stats.n_dogs_classified, 3);
    assert_eq!(stats.n_non_dogs_classified, 2);
    assert_eq!(stats.n_correct_breed, 2);
    assert_eq!(stats.n_label_matches, 4);
    assert_eq!(stats.pct_correct_dogs, 100.0);
    assert!((stats.pct_correct_non_dogs - 200.0 / 3.0).abs() < 1e-9);
    assert!((stats.pct_correct_breed - 2.0 / 3.0).abs() < 1e-9);
    assert!((stats.pct_label_matches - 4.0 / 6.0).abs() < 1e-9);
    assert!(stats.has_dog_mistakes());
}

#[test]
fn summary_serializes_with_fixed_statistic_names() {
    let names = reference_names();
    let table = pet_table(&[("a.jpg", "beagle", "beagle")], &names);
    let stats = summarize(&table).expect("summarize");

    let json = serde_json::to_value(stats).expect("serialize summary");
    let object = json.as_object().expect("summary is an object");
    for (name, value) in stats.entries() {
        let stored = object
            .get(name)
            .and_then(|value| value.as_f64())
            .unwrap_or_else(|| panic!("missing statistic {name}"));
        assert_eq!(stored, value);
    }
    assert_eq!(object.len(), 10);
}
