use super::*;

#[test]
fn test_dataset_labels_and_variables() {
    let dataset = test_dataset(3);

    assert_eq!(dataset.labels(), vec!["DATETIME", "ozone", "co2", "temp"]);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.variable("CO2").unwrap().name(), Some("co2"));
    assert_eq!(*dataset.variable("co2").unwrap().at(-1).unwrap(), 20.0);
}

#[test]
fn test_series_stay_aligned() {
    let dataset = test_dataset(4);
    for series in dataset.series() {
        assert_eq!(series.len(), 4);
        assert_eq!(series.timestamp_at(2).unwrap(), ts(2));
    }
}

#[test]
fn test_row_access() {
    let dataset = test_dataset(3);

    assert_eq!(dataset.row(1).unwrap(), vec![&1.0, &10.0, &-1.0]);
    assert_eq!(dataset.row(ts(2)).unwrap(), vec![&2.0, &20.0, &-2.0]);

    let (stamp, values) = dataset.row_with_time(0).unwrap();
    assert_eq!(stamp, ts(0));
    assert_eq!(values, vec![&0.0, &0.0, &-0.0]);
}

#[test]
fn test_last_row_follows_appends() {
    let mut dataset = test_dataset(2);
    assert_eq!(dataset.row(-1).unwrap(), vec![&1.0, &10.0, &-1.0]);

    dataset.add_data(vec![Record::new(ts(30), vec![7.0, 8.0, 9.0])]).unwrap();
    assert_eq!(dataset.row(-1).unwrap(), vec![&7.0, &8.0, &9.0]);
    assert_eq!(dataset.last_timestamp("temp").unwrap(), Some(ts(30)));
}

#[test]
fn test_from_series() {
    let dataset = Dataset::from_series(vec![test_series("a", 3), test_series("b", 3)]).unwrap();
    assert_eq!(dataset.names(), vec!["a", "b"]);
    assert_eq!(dataset.len(), 3);

    let result = Dataset::from_series(vec![test_series("a", 3), test_series("b", 2)]);
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = Dataset::from_series(vec![TimeSeries::<f64>::anonymous()]);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_from_series_requires_aligned_timestamps() {
    let a = test_series("a", 2);
    let mut b = TimeSeries::new("b");
    b.append(vec![(ts(50), 10.0), (ts(51), 11.0)]).unwrap();

    let result = Dataset::from_series(vec![a, b]);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_from_series_requires_one_capability() {
    let mut b = TimeSeries::with_capability("b", Capability::AppendOnly);
    b.append((0..2).map(|i| (ts(i), 0.0))).unwrap();

    let result = Dataset::from_series(vec![test_series("a", 2), b]);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_flat_export() {
    let dataset = test_dataset(2);

    let records = dataset.to_records();
    assert_eq!(records[1], Record::new(ts(1), vec![1.0, 10.0, -1.0]));

    let csv = dataset.to_csv();
    assert_eq!(
        csv,
        "year,month,day,hour,minute,second,ozone,co2,temp\n\
         2011,07,21,10,00,00,0,0,-0\n\
         2011,07,21,10,00,01,1,10,-1"
    );
}

#[test]
fn test_append_only_dataset() {
    let config = DatasetConfig {
        capability: Capability::AppendOnly,
    };
    let mut dataset = Dataset::with_config(&["ozone"], config).unwrap();
    dataset
        .add_data(vec![Record::new(ts(1), vec![1.0]), Record::new(ts(2), vec![2.0])])
        .unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.last_timestamp("ozone").unwrap(), Some(ts(2)));
    assert!(dataset.to_csv().ends_with("2011,07,21,10,00,02,2"));
    assert!(matches!(dataset.row(0), Err(Error::CapabilityDisabled(_))));
    assert!(matches!(
        dataset.row_slice(Bound::Unbounded, Bound::Unbounded),
        Err(Error::CapabilityDisabled(_))
    ));
}
