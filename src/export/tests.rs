#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            date: "2024-06-01".into(),
            description: "Groceries, weekly".into(),
            amount: dec!(-50.25),
            category: "Food".into(),
        },
        Transaction {
            id: 2,
            date: "2024-06-20".into(),
            description: "Salary".into(),
            amount: dec!(2000),
            category: "Other".into(),
        },
    ]
}

#[test]
fn test_write_csv_rows() {
    let mut buf = Vec::new();
    let count = write_csv(&mut buf, &sample()).unwrap();
    assert_eq!(count, 2);
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,date,description,category,type,amount");
    assert_eq!(lines[1], "1,2024-06-01,\"Groceries, weekly\",Food,expense,-50.25");
    assert_eq!(lines[2], "2,2024-06-20,Salary,Other,income,2000");
}

#[test]
fn test_write_csv_empty_has_header_only() {
    let mut buf = Vec::new();
    assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    assert_eq!(export_to_csv(&path, &sample()).unwrap(), 2);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Salary"));
}
