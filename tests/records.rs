mod common;

use common::{address_body, memo_body, todo_body};
use pdb_reader::pdb::records::{Address, Memo, ToDo};
use pdb_reader::{FieldNames, PackedDate, PdbError, RecordContext, RecordFormat};

fn ctx() -> RecordContext<'static> {
    RecordContext::default()
}

#[test]
fn todo_with_due_date() {
    let body = todo_body(Some((2005, 11, 23)), true, 4, "Buy milk", "2% fat");
    let todo = ToDo::decode(&body, &ctx()).unwrap();
    assert_eq!(todo.due, Some(PackedDate { year: 2005, month: 11, day: 23 }));
    assert!(todo.done);
    assert_eq!(todo.priority, 4);
    assert_eq!(todo.description, "Buy milk");
    assert_eq!(todo.note, "2% fat");
}

#[test]
fn todo_without_due_date_ignores_second_byte() {
    for second in [0x00, 0x7F, 0xFF] {
        let mut body = todo_body(None, false, 1, "Call", "");
        body[1] = second;
        let todo = ToDo::decode(&body, &ctx()).unwrap();
        assert_eq!(todo.due, None);
        assert!(!todo.done);
        assert_eq!(todo.priority, 1);
        assert_eq!(todo.note, "");
    }
}

#[test]
fn todo_text_keeps_line_breaks() {
    let body = todo_body(None, false, 7, "line one\nline two", "a\nb\nc");
    let todo = ToDo::decode(&body, &ctx()).unwrap();
    assert_eq!(todo.priority, 7);
    assert_eq!(todo.description, "line one\nline two");
    assert_eq!(todo.note, "a\nb\nc");
}

#[test]
fn todo_text_is_decoded_as_palm_latin() {
    let mut body = vec![0xFF, 0xFF, 0x01];
    body.extend_from_slice(&[b'C', b'a', b'f', 0xE9, 0, 0x80, 0]);
    let todo = ToDo::decode(&body, &ctx()).unwrap();
    assert_eq!(todo.description, "Café");
    assert_eq!(todo.note, "€");
}

#[test]
fn todo_missing_terminator_is_unterminated() {
    let mut body = todo_body(None, false, 1, "desc", "note");
    body.pop();
    assert!(matches!(
        ToDo::decode(&body, &ctx()),
        Err(PdbError::UnterminatedString { .. })
    ));
}

#[test]
fn todo_shorter_than_fixed_part_is_truncated() {
    assert!(matches!(
        ToDo::decode(&[0xFF, 0xFF], &ctx()),
        Err(PdbError::TruncatedInput { .. })
    ));
}

#[test]
fn memo_ignores_trailing_bytes() {
    let mut body = memo_body("Shopping\n- eggs");
    body.extend_from_slice(b"garbage\0more");
    let memo = Memo::decode(&body, &ctx()).unwrap();
    assert_eq!(memo.text, "Shopping\n- eggs");
}

#[test]
fn memo_without_terminator_is_unterminated() {
    assert!(matches!(
        Memo::decode(b"no end", &ctx()),
        Err(PdbError::UnterminatedString { .. })
    ));
}

#[test]
fn address_maps_present_fields_in_order() {
    // Phone3 (field 5) takes label code 7: Mobile.
    let body = address_body(2, [0, 1, 7, 3, 4], &[(0, "Doe"), (5, "555-1234"), (18, "note")]);
    let address = Address::decode(&body, &ctx()).unwrap();

    let fields: Vec<(&str, &str)> = address.fields.iter().collect();
    assert_eq!(
        fields,
        vec![("Last Name", "Doe"), ("Mobile", "555-1234"), ("Note", "note")]
    );
    assert_eq!(address.fields.len(), 3);
    assert_eq!(address.default_field, "Mobile");
}

#[test]
fn address_renames_each_phone_slot() {
    let body = address_body(
        0,
        [5, 6, 2, 4, 1],
        &[(3, "a"), (4, "b"), (5, "c"), (6, "d"), (7, "e"), (19, "f")],
    );
    let address = Address::decode(&body, &ctx()).unwrap();
    let names: Vec<&str> = address.fields.names().collect();
    assert_eq!(names, vec!["Main", "Pager", "Fax", "E-mail", "Home", "Phone6"]);
    assert_eq!(address.default_field, "Main");
}

#[test]
fn address_default_field_is_empty_when_phone_absent() {
    let body = address_body(0, [0, 1, 2, 3, 4], &[(0, "Doe"), (1, "John")]);
    let address = Address::decode(&body, &ctx()).unwrap();
    assert_eq!(address.default_field, "");
    assert_eq!(address.fields.get("First Name"), Some("John"));
}

#[test]
fn address_reads_the_last_field() {
    let body = address_body(0, [0, 1, 2, 3, 4], &[(21, "last")]);
    let address = Address::decode(&body, &ctx()).unwrap();
    assert_eq!(address.fields.get("Phone8"), Some("last"));
}

#[test]
fn address_uses_caller_labels_without_mutating_them() {
    let mut names: Vec<String> = FieldNames::DEFAULT.iter().map(|s| s.to_string()).collect();
    names[0] = "Nachname".to_string();
    let labels = FieldNames::new(names).unwrap();
    let before = labels.clone();
    let ctx = RecordContext {
        labels: Some(&labels),
        ..RecordContext::default()
    };

    let first = Address::decode(&address_body(0, [7, 1, 2, 3, 4], &[(0, "Doe"), (3, "1")]), &ctx).unwrap();
    let second = Address::decode(&address_body(0, [0, 1, 2, 3, 4], &[(3, "2")]), &ctx).unwrap();

    assert_eq!(first.fields.get("Nachname"), Some("Doe"));
    assert_eq!(first.fields.get("Mobile"), Some("1"));
    assert_eq!(second.fields.get("Work"), Some("2"));
    assert_eq!(labels, before);
    assert_eq!(labels.get(3), Some("Phone1"));
}

#[test]
fn address_duplicate_names_keep_first_position() {
    let body = address_body(0, [0, 0, 1, 3, 4], &[(3, "first"), (4, "second"), (5, "home")]);
    let address = Address::decode(&body, &ctx()).unwrap();
    let fields: Vec<(&str, &str)> = address.fields.iter().collect();
    assert_eq!(fields, vec![("Work", "second"), ("Home", "home")]);
}

#[test]
fn address_label_code_out_of_table_is_unknown() {
    let body = address_body(0, [9, 1, 2, 3, 4], &[(0, "Doe")]);
    assert_eq!(
        Address::decode(&body, &ctx()),
        Err(PdbError::UnknownEnumValue { field: "address phone label", value: 9 })
    );
}

#[test]
fn address_display_phone_past_phone5_keeps_fields() {
    let body = address_body(5, [0, 1, 2, 3, 4], &[(0, "Doe"), (8, "Main St")]);
    let address = Address::decode(&body, &ctx()).unwrap();
    assert_eq!(address.default_field, "");
    assert_eq!(address.fields.get("Last Name"), Some("Doe"));
    assert_eq!(address.fields.get("Address"), Some("Main St"));
}

#[test]
fn address_missing_value_is_unterminated() {
    let mut body = address_body(0, [0, 1, 2, 3, 4], &[(0, "Doe"), (1, "John")]);
    body.truncate(body.len() - 3);
    assert!(matches!(
        Address::decode(&body, &ctx()),
        Err(PdbError::UnterminatedString { .. })
    ));
}
