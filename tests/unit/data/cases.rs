use super::*;

const CSV: &str = "\
codes,2020-01-22,2020-01-23,2020-01-24
USA,1,1,2
CHN,548,643,
IND,0,NaN,3
";

#[test]
fn loads_dates_in_column_order() {
    let t = CaseTable::from_reader(CSV.as_bytes(), "codes").unwrap();
    assert_eq!(t.dates(), ["2020-01-22", "2020-01-23", "2020-01-24"]);
    assert_eq!(t.region_count(), 3);
}

#[test]
fn looks_up_counts_by_code_and_date() {
    let t = CaseTable::from_reader(CSV.as_bytes(), "codes").unwrap();
    assert_eq!(t.count_on("CHN", "2020-01-23"), Some(643.0));
    assert_eq!(t.count("USA", 2), Some(2.0));
}

#[test]
fn empty_and_nan_cells_are_missing() {
    let t = CaseTable::from_reader(CSV.as_bytes(), "codes").unwrap();
    assert_eq!(t.count_on("CHN", "2020-01-24"), None);
    assert_eq!(t.count_on("IND", "2020-01-23"), None);
    assert_eq!(t.count_on("IND", "2020-01-22"), Some(0.0));
}

#[test]
fn unknown_region_or_date_is_missing() {
    let t = CaseTable::from_reader(CSV.as_bytes(), "codes").unwrap();
    assert!(!t.contains("FRA"));
    assert_eq!(t.count_on("FRA", "2020-01-22"), None);
    assert_eq!(t.count_on("USA", "1999-01-01"), None);
    assert_eq!(t.count("USA", 99), None);
}

#[test]
fn code_column_may_be_anywhere() {
    let csv = "d1,iso,d2\n5,USA,7\n";
    let t = CaseTable::from_reader(csv.as_bytes(), "iso").unwrap();
    assert_eq!(t.dates(), ["d1", "d2"]);
    assert_eq!(t.count_on("USA", "d2"), Some(7.0));
}

#[test]
fn missing_code_column_is_input_error() {
    let err = CaseTable::from_reader(CSV.as_bytes(), "iso3").unwrap_err();
    assert!(matches!(err, ChoroError::Input(_)));
}

#[test]
fn malformed_count_is_input_error() {
    let csv = "codes,d1\nUSA,lots\n";
    let err = CaseTable::from_reader(csv.as_bytes(), "codes").unwrap_err();
    assert!(err.to_string().contains("lots"));
}

#[test]
fn duplicate_code_is_input_error() {
    let csv = "codes,d1\nUSA,1\nUSA,2\n";
    assert!(CaseTable::from_reader(csv.as_bytes(), "codes").is_err());
}

#[test]
fn duplicate_date_column_is_input_error() {
    let csv = "codes,d1,d1\nUSA,10,600\n";
    let err = CaseTable::from_reader(csv.as_bytes(), "codes").unwrap_err();
    assert!(err.to_string().contains("duplicate date column 'd1'"));
}

#[test]
fn missing_file_is_error() {
    assert!(CaseTable::from_path(Path::new("target/does-not-exist.csv"), "codes").is_err());
}

#[test]
fn from_series_orders_dates_by_first_appearance() {
    let t = CaseTable::from_series([
        ("USA", vec![("2020-01-01", 10.0), ("2020-01-02", 600.0)]),
        ("FRA", vec![("2020-01-02", 3.0)]),
    ]);
    assert_eq!(t.dates(), ["2020-01-01", "2020-01-02"]);
    assert_eq!(t.count_on("USA", "2020-01-02"), Some(600.0));
    assert_eq!(t.count_on("FRA", "2020-01-01"), None);
}
