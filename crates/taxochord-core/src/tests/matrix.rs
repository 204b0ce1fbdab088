use super::rows;
use crate::*;

fn build(records: &[Record]) -> SimilarityMatrix {
    Engine::new().build(records).matrix
}

#[test]
fn three_dataset_scenario_matches_expected_cells() {
    let mut records = rows("A", &["2", "3"]);
    records.extend(rows("B", &["1"]));
    records.extend(rows("C", &["0", "5"]));

    let m = build(&records);
    assert_eq!(m.rows(), vec![
        vec![5.0, 1.0, 5.0],
        vec![1.0, 1.0, 1.0],
        vec![5.0, 1.0, 5.0],
    ]);
    assert!(m.is_symmetric());
}

#[test]
fn zero_and_negative_entries_do_not_overlap() {
    let records = vec![
        Record::new("A").with_column("k__X", "4").with_column("k__Y", "0"),
        Record::new("B").with_column("k__X", "-2").with_column("k__Y", "7"),
    ];
    let m = build(&records);
    assert_eq!(m.get(0, 1), 0.0);
    assert_eq!(m.get(0, 0), 4.0);
    assert_eq!(m.get(1, 1), 7.0);
}

#[test]
fn diagonal_is_positive_self_total() {
    let records = vec![
        Record::new("A")
            .with_column("k__X", "1.5")
            .with_column("k__Y", "2.5")
            .with_column("k__Z", "0"),
    ];
    let m = build(&records);
    assert_eq!(m.get(0, 0), 4.0);
}

#[test]
fn matrix_is_symmetric_and_non_negative_over_many_profiles() {
    let cols = ["k__A", "k__B", "k__C", "k__D"];
    let mut records = Vec::new();
    for i in 0..8u32 {
        let mut r = Record::new(format!("ds{i}"));
        for (c, col) in cols.iter().enumerate() {
            let v = ((i * 7 + c as u32 * 3) % 5) as f64 - 1.0;
            r = r.with_column(*col, v.to_string());
        }
        records.push(r);
    }
    let m = build(&records);
    assert_eq!(m.len(), 8);
    for i in 0..m.len() {
        for j in 0..m.len() {
            assert_eq!(m.get(i, j), m.get(j, i));
            assert!(m.get(i, j) >= 0.0);
        }
    }
}

#[test]
fn empty_input_builds_empty_matrix() {
    let m = build(&[]);
    assert!(m.is_empty());
    assert!(m.rows().is_empty());
    assert_eq!(serde_json::to_string(&m).unwrap(), "[]");
}

#[test]
fn from_rows_rejects_ragged_input() {
    assert!(SimilarityMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
    let m = SimilarityMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
    assert_eq!(m.row_total(0), 3.0);
}

#[test]
fn checked_access_rejects_out_of_range_indices() {
    let m = SimilarityMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
    assert_eq!(m.try_get(1, 0), Some(2.0));
    assert_eq!(m.try_get(2, 0), None);
    assert_eq!(m.try_get(0, 2), None);
    assert_eq!(m.try_row(1), Some(&[2.0, 1.0][..]));
    assert_eq!(m.try_row(2), None);
    assert_eq!(SimilarityMatrix::default().try_get(0, 0), None);
}
