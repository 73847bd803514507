//! A whole row cleaned and rendered column by column.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use collection_literals::btree;
use rowcast::{ErasedWidget, InMemoryLookup, Record, RecordLookup, Row, Value, WidgetSpec};

const COLUMNS: &str = r#"{
    "name": {"type": "char"},
    "author": {"type": "foreign_key", "kind": "author", "field": "name"},
    "categories": {"type": "many_to_many", "kind": "category"},
    "published": {"type": "date", "formats": ["%d.%m.%Y"]},
    "price": {"type": "decimal"},
    "available": {"type": "boolean"}
}"#;

fn lookup() -> Arc<dyn RecordLookup> {
    Arc::new(
        InMemoryLookup::new()
            .with_records("author", vec![Record::new().with("id", 5i64).with("name", "Foo")])
            .with_records(
                "category",
                vec![
                    Record::new().with("id", 1i64).with("name", "Cat úňíčóďě"),
                    Record::new().with("id", 2i64).with("name", "Cat 2"),
                ],
            ),
    )
}

fn columns() -> BTreeMap<String, Box<dyn ErasedWidget>> {
    let specs: BTreeMap<String, WidgetSpec> = serde_json::from_str(COLUMNS).unwrap();
    let lookup = lookup();
    specs
        .into_iter()
        .map(|(name, spec)| (name, spec.build(Some(lookup.clone())).unwrap()))
        .collect()
}

fn row() -> Row {
    Row::from(btree! {
        "name".to_string() => Value::from("Some book"),
        "author".to_string() => Value::from("Foo"),
        "categories".to_string() => Value::from("1,2,"),
        "published".to_string() => Value::from("13.08.1868"),
        "price".to_string() => Value::from("10.50"),
        "available".to_string() => Value::from("True"),
    })
}

#[test]
fn clean_then_render_row() {
    let columns = columns();
    let row = row();

    let mut cleaned = BTreeMap::new();
    for (name, widget) in &columns {
        let raw = row.get(name).cloned().unwrap_or(Value::Null);
        cleaned.insert(name.clone(), widget.clean_value(&raw, Some(&row)).unwrap());
    }

    assert_eq!(
        cleaned["published"],
        Value::Date(NaiveDate::from_ymd_opt(1868, 8, 13).unwrap())
    );
    assert_eq!(cleaned["available"], Value::Bool(true));
    match &cleaned["categories"] {
        Value::Array(items) => assert_eq!(items.len(), 2),
        other => panic!("expected categories, got {:?}", other),
    }

    let rendered: BTreeMap<_, _> = columns
        .iter()
        .map(|(name, widget)| (name.clone(), widget.render_value(&cleaned[name]).unwrap()))
        .collect();
    assert_eq!(rendered["name"], Value::from("Some book"));
    assert_eq!(rendered["author"], Value::from("Foo"));
    assert_eq!(rendered["categories"], Value::from("1,2"));
    assert_eq!(rendered["published"], Value::from("13.08.1868"));
    assert_eq!(rendered["available"], Value::from("1"));
    match &rendered["price"] {
        Value::Decimal(d) => assert_eq!(d.to_string(), "10.50"),
        other => panic!("expected decimal, got {:?}", other),
    }
}

#[test]
fn missing_cells_clean_to_nothing() {
    let columns = columns();
    for (name, widget) in &columns {
        let cleaned = widget.clean_value(&Value::Null, None).unwrap();
        match name.as_str() {
            "categories" => assert_eq!(cleaned, Value::Array(vec![])),
            _ => assert_eq!(cleaned, Value::Null, "column {}", name),
        }
    }
}
