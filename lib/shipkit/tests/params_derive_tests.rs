//! Integration tests for `#[derive(Params)]`.

use chrono::{TimeZone, Utc};
use shipkit::{ParamValue, Params, ToParamValue, ToParams, encode, flatten_params};

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[derive(Debug, Clone, Default, Params)]
struct Item {
    description: String,
    quantity: u32,
}

#[derive(Debug, Clone, Default, Params)]
struct Meta {
    id: Option<String>,
    reference: Option<String>,
}

#[derive(Debug, Default, Params)]
struct Package {
    #[params(flatten)]
    meta: Meta,
    weight: Option<f64>,
    fragile: bool,
    items: Vec<Item>,
    labels: Vec<String>,
    destination: Option<Meta>,
    #[params(skip)]
    cached_total: f64,
}

#[test]
fn test_fields_render_in_declaration_order() {
    let package = Package {
        meta: Meta {
            id: None,
            reference: Some("order-7".to_string()),
        },
        weight: Some(12.5),
        fragile: true,
        items: vec![
            Item {
                description: "Mug".to_string(),
                quantity: 2,
            },
            Item {
                description: "Plate".to_string(),
                quantity: 4,
            },
        ],
        labels: vec!["a".to_string(), "b".to_string()],
        destination: Some(Meta {
            id: Some("adr_1".to_string()),
            reference: None,
        }),
        cached_total: 99.0,
    };

    assert_eq!(
        flatten_params(&package.to_params(), "package"),
        [
            pair("package[reference]", "order-7"),
            pair("package[weight]", "12.5"),
            pair("package[fragile]", "true"),
            pair("package[items][0][description]", "Mug"),
            pair("package[items][0][quantity]", "2"),
            pair("package[items][1][description]", "Plate"),
            pair("package[items][1][quantity]", "4"),
            pair("package[labels][0]", "a"),
            pair("package[labels][1]", "b"),
            pair("package[destination][id]", "adr_1"),
        ]
    );
}

#[test]
fn test_none_and_empty_lists_are_omitted() {
    let package = Package::default();

    assert_eq!(
        flatten_params(&package.to_params(), "package"),
        [pair("package[fragile]", "false")]
    );
}

#[test]
fn test_skipped_field_is_absent() {
    let params = Package::default().to_params();

    assert!(params.get("cached_total").is_none());
    assert_eq!(
        params.keys().collect::<Vec<_>>(),
        ["id", "reference", "weight", "fragile", "items", "labels", "destination"]
    );
}

#[test]
fn test_nested_object_is_a_map_value() {
    let item = Item {
        description: "Mug".to_string(),
        quantity: 1,
    };

    assert_eq!(
        item.to_param_value(),
        ParamValue::Map(
            Params::new()
                .with("description", "Mug")
                .with("quantity", 1_u32)
        )
    );
}

#[derive(Params)]
#[params(rename_all = "camelCase")]
struct Renamed {
    first_name: &'static str,
    #[params(rename = "zip_code")]
    postal_code: &'static str,
    r#type: &'static str,
}

#[test]
fn test_rename_rules_and_raw_identifiers() {
    let renamed = Renamed {
        first_name: "Ada",
        postal_code: "94104",
        r#type: "home",
    };

    assert_eq!(
        flatten_params(&renamed.to_params(), ""),
        [
            pair("firstName", "Ada"),
            pair("zip_code", "94104"),
            pair("type", "home"),
        ]
    );
}

#[derive(Params)]
struct Window {
    start: chrono::DateTime<Utc>,
    note: Option<String>,
}

#[test]
fn test_dates_and_encoding() {
    let window = Window {
        start: Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap(),
        note: Some("ring twice & wait".to_string()),
    };

    insta::assert_snapshot!(
        encode(&flatten_params(&window.to_params(), "window")),
        @"window%5Bstart%5D=2024-05-01T14%3A30%3A00Z&window%5Bnote%5D=ring%20twice%20%26%20wait"
    );
}

#[derive(Params)]
struct Borrowed<'a> {
    name: &'a str,
    tags: &'a [&'a str],
}

#[test]
fn test_generic_lifetimes() {
    let tags = ["x", "y"];
    let borrowed = Borrowed {
        name: "box",
        tags: &tags,
    };

    assert_eq!(
        flatten_params(&borrowed.to_params(), "b"),
        [pair("b[name]", "box"), pair("b[tags][0]", "x"), pair("b[tags][1]", "y")]
    );
}
