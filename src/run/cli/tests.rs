#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;

fn june_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_query_defaults() {
    let q = parse_query(&[], june_15(), true).unwrap();
    assert_eq!(q.range, TimeRange::Month);
    assert_eq!(q.date, june_15());
    assert!(!q.json);
    assert!(q.positional.is_empty());
}

#[test]
fn test_parse_query_range_date_and_json() {
    let q = parse_query(&args(&["year", "--date", "2023-02-01", "--json"]), june_15(), true).unwrap();
    assert_eq!(q.range, TimeRange::Year);
    assert_eq!(q.date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
    assert!(q.json);
}

#[test]
fn test_parse_query_export_path_is_positional() {
    let q = parse_query(&args(&["~/out.csv", "--range", "all"]), june_15(), false).unwrap();
    assert_eq!(q.range, TimeRange::All);
    assert_eq!(q.positional, vec!["~/out.csv".to_string()]);
}

#[test]
fn test_parse_query_rejects_bad_values() {
    assert!(parse_query(&args(&["--date", "06/15/2024"]), june_15(), true).is_err());
    assert!(parse_query(&args(&["--date"]), june_15(), true).is_err());
    assert!(parse_query(&args(&["--range", "week"]), june_15(), true).is_err());
}

#[test]
fn test_parse_query_export_filename_that_looks_like_a_range() {
    let q = parse_query(&args(&["all", "--range", "year"]), june_15(), false).unwrap();
    assert_eq!(q.range, TimeRange::Year);
    assert_eq!(q.positional, vec!["all".to_string()]);

    let q = parse_query(&args(&["m"]), june_15(), false).unwrap();
    assert_eq!(q.range, TimeRange::Month);
    assert_eq!(q.positional, vec!["m".to_string()]);
}

#[test]
fn test_parse_query_range_word_for_summary() {
    let q = parse_query(&args(&["all"]), june_15(), true).unwrap();
    assert_eq!(q.range, TimeRange::All);
    assert!(q.positional.is_empty());
}
