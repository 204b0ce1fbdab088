use super::rows;
use crate::*;

#[test]
fn parse_number_is_lenient() {
    assert_eq!(parse_number("3"), 3.0);
    assert_eq!(parse_number("  2.5"), 2.5);
    assert_eq!(parse_number("3.5abc"), 3.5);
    assert_eq!(parse_number("1e2"), 100.0);
    assert_eq!(parse_number("1e"), 1.0);
    assert_eq!(parse_number(".5"), 0.5);
    assert_eq!(parse_number("5."), 5.0);
    assert_eq!(parse_number("-4"), -4.0);
    assert_eq!(parse_number(""), 0.0);
    assert_eq!(parse_number("abc"), 0.0);
    assert_eq!(parse_number("."), 0.0);
    assert_eq!(parse_number("NA"), 0.0);
    assert_eq!(parse_number("Infinity"), 0.0);
    assert_eq!(parse_number("1e999"), 0.0);
}

#[test]
fn aggregate_sums_exactly_the_rows_of_each_dataset() {
    let mut records = rows("A", &["2", "3"]);
    records.extend(rows("B", &["1"]));
    records.extend(rows("C", &["0", "5"]));
    records.extend(rows("A", &["oops", ""]));

    let sel = select(&records, 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");

    assert_eq!(agg.columns.names(), &["k__X".to_string()]);
    let values: Vec<f64> = agg.profiles.iter().map(|p| p.value("k__X")).collect();
    assert_eq!(values, vec![5.0, 1.0, 5.0]);
}

#[test]
fn columns_come_from_first_filtered_row_and_default_to_zero() {
    let records = vec![
        Record::new("A")
            .with_column("k__Bacteria", "1")
            .with_column("note", "ignored")
            .with_column("k__Archaea", "2"),
        Record::new("B").with_column("k__Bacteria", "4"),
    ];
    let sel = select(&records, 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");

    assert_eq!(
        agg.columns.names(),
        &["k__Bacteria".to_string(), "k__Archaea".to_string()]
    );
    let b = &agg.profiles[1];
    assert_eq!(b.profile.len(), 2);
    assert_eq!(b.value("k__Bacteria"), 4.0);
    assert_eq!(b.profile.get("k__Archaea"), Some(&0.0));
}

#[test]
fn columns_ignore_rows_of_unselected_datasets() {
    let records = vec![
        Record::new("skipped").with_column("k__Other", "1"),
        Record::new("A").with_column("k__X", "1"),
    ];
    let sel = select(&records[1..], 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");
    assert_eq!(agg.columns.names(), &["k__X".to_string()]);
}

#[test]
fn empty_selection_yields_empty_columns() {
    let records = rows("A", &["1"]);
    let sel = select(&records, 0);
    let agg = aggregate::aggregate(&records, &sel, "k__");
    assert!(agg.columns.is_empty());
    assert!(agg.profiles.is_empty());
}

#[test]
fn label_uses_first_row_and_falls_back_per_segment() {
    let records = vec![
        Record::new("A").with_sample_id("s1").with_country("NL"),
        Record::new("A").with_sample_id("s2").with_country("DE"),
        Record::new("B").with_sample_id("s3").with_country(""),
        Record::new("C").with_country("US"),
    ];
    let sel = select(&records, 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");

    assert_eq!(agg.labels(), vec![
        "A | s1 | NL",
        "B | s3 | Unknown Country",
        "C | Unknown Sample | US",
    ]);
    assert_eq!(agg.label_of("B"), Some("B | s3 | Unknown Country"));
}

#[test]
fn empty_sample_id_yields_unknown_sample_for_every_dataset() {
    let records = vec![
        Record::new("A").with_sample_id("").with_country("NL"),
        Record::new("A").with_sample_id(""),
        Record::new("B").with_sample_id("").with_country("FR"),
    ];
    let sel = select(&records, 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");
    for p in &agg.profiles {
        let segments: Vec<&str> = p.label.split(LABEL_SEPARATOR).collect();
        assert_eq!(segments[1], "Unknown Sample", "label={}", p.label);
    }
}

#[test]
fn nameless_dataset_label_uses_unknown_dataset() {
    let records = vec![Record::default().with_sample_id("s").with_country("X")];
    let sel = select(&records, 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");
    assert_eq!(agg.profiles[0].label, "Unknown Dataset | s | X");
}

#[test]
fn label_without_representative_uses_bare_name() {
    assert_eq!(
        label_of(None, "ghost"),
        "ghost | Unknown Sample | Unknown Country"
    );
}

#[test]
fn representative_is_first_row_of_dataset() {
    let records = vec![
        Record::new("A").with_metadata(Some("gut"), Some("IBD"), Some("30"), None),
        Record::new("A").with_metadata(Some("skin"), None, None, Some("female")),
    ];
    let sel = select(&records, 10);
    let agg = aggregate::aggregate(&records, &sel, "k__");
    let rep = agg.profiles[0].representative.as_ref().unwrap();
    assert_eq!(rep.field(MetadataField::Bodysite), Some("gut"));
    assert_eq!(rep.field(MetadataField::Gender), None);
    assert_eq!(rep.field_or_placeholder(MetadataField::Gender), "Unknown Gender");
}

#[test]
fn representative_keeps_metadata_without_data_columns() {
    let record = Record::new("A")
        .with_sample_id("s1")
        .with_metadata(Some("gut"), Some(""), None, None)
        .with_column("k__X", "3");
    let rep = RepresentativeRecord::from_record(&record);
    assert!(rep.record().columns.is_empty());
    assert_eq!(rep.field(MetadataField::SampleId), Some("s1"));
    assert_eq!(rep.field(MetadataField::Bodysite), Some("gut"));
    assert_eq!(rep.field(MetadataField::Disease), None);
    assert_eq!(
        serde_json::to_value(&rep).unwrap(),
        serde_json::json!({
            "datasetName": "A",
            "sampleId": "s1",
            "country": null,
            "bodysite": "gut",
            "disease": "",
            "age": null,
            "gender": null
        })
    );
}
