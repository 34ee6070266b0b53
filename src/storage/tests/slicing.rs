use super::*;

#[test]
fn test_unbounded_slice_is_everything() {
    let series = test_series("ozone", 5);
    let view = series.slice(Bound::Unbounded, Bound::Unbounded).unwrap();

    let all: Vec<f64> = series.points().iter().map(|p| p.value).collect();
    assert_eq!(view.to_vec(), all);
}

#[test]
fn test_timestamp_slice_matches_positional_slice() {
    let series = test_series("ozone", 10);

    let by_time = series.slice(ts(2), ts(7)).unwrap();
    let by_pos = series.slice(2, 7).unwrap();
    assert_eq!(by_time.to_vec(), by_pos.to_vec());
    assert_eq!(by_time.len(), 5);
}

#[test]
fn test_mixed_bounds() {
    let series = test_series("ozone", 10);

    let tail = series.slice(ts(7), Bound::Unbounded).unwrap();
    assert_eq!(tail.to_vec(), vec![10.5, 12.0, 13.5]);

    let mixed = series.slice(ts(6), -2).unwrap();
    assert_eq!(mixed.timestamps().collect::<Vec<_>>(), vec![ts(6), ts(7)]);

    let last_two = series.slice(-2, Bound::Unbounded).unwrap();
    assert_eq!(last_two.to_vec(), vec![12.0, 13.5]);
}

#[test]
fn test_slice_to_and_with_time() {
    let series = test_series("ozone", 4);
    let head = series.slice_to(2).unwrap();

    let pairs: Vec<_> = head.with_time().map(|(t, v)| (t, *v)).collect();
    assert_eq!(pairs, vec![(ts(0), 0.0), (ts(1), 1.5)]);
}

#[test]
fn test_views_are_restartable() {
    let series = test_series("ozone", 4);
    let view = series.slice(1, 3).unwrap();

    let first: Vec<_> = view.values().collect();
    let second: Vec<_> = view.values().collect();
    assert_eq!(first, second);
}

#[test]
fn test_inverted_bounds_give_empty_view() {
    let series = test_series("ozone", 4);
    assert!(series.slice(3, 1).unwrap().is_empty());
}

#[test]
fn test_bound_from_option() {
    let series = test_series("ozone", 4);
    let view = series
        .slice(Bound::from_option(None::<i32>), Bound::from_option(Some(ts(2))))
        .unwrap();
    assert_eq!(view.len(), 2);
}

#[test]
fn test_dataset_row_slice() {
    let dataset = test_dataset(5);
    let view = dataset.row_slice(ts(1), 3).unwrap();

    let rows: Vec<Vec<f64>> = view.rows().map(|r| r.into_iter().copied().collect()).collect();
    assert_eq!(rows, vec![vec![1.0, 10.0, -1.0], vec![2.0, 20.0, -2.0]]);

    let stamped: Vec<_> = view.rows_with_time().map(|(t, _)| t).collect();
    assert_eq!(stamped, vec![ts(1), ts(2)]);
}

#[test]
fn test_missing_stop_timestamp() {
    let series = test_series("ozone", 5);
    assert!(matches!(series.slice(ts(1), ts(40)), Err(Error::Lookup(_))));
    assert!(matches!(series.slice_to(ts(40)), Err(Error::Lookup(_))));
}

#[test]
fn test_dataset_row_slice_missing_timestamp() {
    let dataset = test_dataset(5);
    assert!(matches!(dataset.row_slice(ts(40), Bound::Unbounded), Err(Error::Lookup(_))));
    assert!(matches!(dataset.row_slice(ts(1), ts(40)), Err(Error::Lookup(_))));
}
