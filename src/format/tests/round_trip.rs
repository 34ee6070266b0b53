use super::*;
use crate::storage::Dataset;

#[test]
fn test_split_fields_text_round_trips() {
    let text = flight_text();
    let (header, labels, records) = read(&text).unwrap();

    assert_eq!(serialize(&header, &labels, &records), text);
}

#[test]
fn test_body_round_trips_without_header() {
    let (header, labels, records) = read(SPLIT_BODY).unwrap();
    assert_eq!(header, "");
    assert_eq!(serialize(&header, &labels, &records), SPLIT_BODY);
}

#[test]
fn test_date_utc_written_as_split_fields() {
    let (header, labels, records) = read("DATE,UTC,CO\n2011-21-07,10:31:47,101.5\n").unwrap();

    assert_eq!(
        serialize(&header, &labels, &records),
        "YEAR,MONTH,DAY,HOUR,MINUTE,SECOND,CO\n2011,07,21,10,31,47,101.5\n"
    );
}

#[test]
fn test_dataset_serializes_through_codec() {
    let (_, labels, records) = read(SPLIT_BODY).unwrap();
    let mut dataset = Dataset::new(&labels[1..]).unwrap();
    dataset.add_data(records).unwrap();

    assert_eq!(serialize("", &dataset.labels(), &dataset.to_records()), SPLIT_BODY);
}

#[test]
fn test_unpadded_text_is_normalized() {
    let text = "YEAR, MONTH,DAY,HOUR,MINUTE,SECOND,CO\n2011,7,21,9,5,0,1.5\n";
    let (header, labels, records) = read(text).unwrap();

    assert_eq!(
        serialize(&header, &labels, &records),
        "YEAR,MONTH,DAY,HOUR,MINUTE,SECOND,CO\n2011,07,21,09,05,00,1.5\n"
    );
}
