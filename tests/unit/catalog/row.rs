use super::*;

#[test]
fn four_field_row_has_no_attribute() {
    let row = TraitRow::from_fields(&["base.png", "base", "0", "1"], 2).unwrap();
    assert_eq!(row.layer_name, "base.png");
    assert_eq!(row.group, "base");
    assert_eq!(row.order, 0);
    assert_eq!(row.weight, 1);
    assert!(!row.has_attribute());
    assert_eq!(row.metadata_value, "");
}

#[test]
fn six_field_row_carries_metadata() {
    let row =
        TraitRow::from_fields(&["red.png", "visor", "3", "5", "Visor", "Red"], 2).unwrap();
    assert_eq!(row.order, 3);
    assert_eq!(row.weight, 5);
    assert_eq!(row.metadata_key, "Visor");
    assert_eq!(row.metadata_value, "Red");
    assert!(row.has_attribute());
}

#[test]
fn wrong_field_count_names_the_line() {
    let err = TraitRow::from_fields(&["a", "b", "1", "1", "k"], 7).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 7"));
    assert!(msg.contains("got 5"));
}

#[test]
fn non_numeric_or_negative_weight_is_rejected() {
    assert!(TraitRow::from_fields(&["a", "g", "0", "heavy"], 2).is_err());
    assert!(TraitRow::from_fields(&["a", "g", "0", "-1"], 2).is_err());
    assert!(TraitRow::from_fields(&["a", "g", "top", "1"], 2).is_err());
}

#[test]
fn read_rows_skips_header_and_trims_fields() {
    let tsv = "Name\tGroup\tOrder\tWeight\tKey\tValue\n\
               base.png \t base\t0\t1\n\
               red.png\tvisor\t 1\t2\tcolor\t red \n";
    let rows = read_rows(tsv.as_bytes(), true).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].layer_name, "base.png");
    assert_eq!(rows[0].group, "base");
    assert_eq!(rows[1].order, 1);
    assert_eq!(rows[1].metadata_value, "red");
}

#[test]
fn read_rows_without_header_keeps_first_line() {
    let tsv = "base.png\tbase\t0\t1\n";
    let rows = read_rows(tsv.as_bytes(), false).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn read_rows_reports_bad_weight() {
    let tsv = "h\n\
               base.png\tbase\t0\tx\n";
    let err = read_rows(tsv.as_bytes(), true).unwrap_err();
    assert!(err.to_string().contains("weight"));
}

#[test]
fn read_rows_skips_blank_lines() {
    let tsv = "name\tgroup\torder\tweight\n\
               \n\
               base.png\tbase\t0\t1\n\
               \t\t\t\n   \n\
               red.png\tvisor\t1\t1\tcolor\tred\n";
    let rows = read_rows(tsv.as_bytes(), true).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].layer_name, "base.png");
    assert_eq!(rows[1].layer_name, "red.png");
    assert_eq!(rows[1].metadata_value, "red");
}
