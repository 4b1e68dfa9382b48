// tests/schema_unify.rs
//
// Column discovery across a batch of products.
//
use catalog_scrape::{Attribute, LEADING_COLUMNS, ProductRecord, UnifiedSchema};

fn product(url: &str, attrs: &[(&str, &str)]) -> ProductRecord {
    let mut p = ProductRecord::new(url);
    p.name = format!("Product {url}");
    p.attributes = attrs.iter().map(|(n, v)| Attribute::new(*n, *v)).collect();
    p
}

#[test]
fn first_seen_order_with_columns_after_leading_block() {
    let products = vec![
        product("a", &[("Color", "Red"), ("Weight", "1kg")]),
        product("b", &[("Color", "Blue")]),
    ];
    let schema = UnifiedSchema::unify(&products);

    assert_eq!(LEADING_COLUMNS, 9);
    assert_eq!(schema.names(), &["Color", "Weight"]);
    assert_eq!(schema.column("Color"), Some(10));
    assert_eq!(schema.column("Weight"), Some(11));
    assert_eq!(schema.column("Size"), None);
    assert_eq!(schema.width(), 11);
}

#[test]
fn later_products_append_new_names_only() {
    let products = vec![
        product("a", &[("B", "1")]),
        product("b", &[("A", "2"), ("B", "3"), ("C", "4")]),
        product("c", &[("C", "5"), ("D", "6")]),
    ];
    let schema = UnifiedSchema::unify(&products);
    let cols: Vec<(&str, usize)> = schema.columns().collect();
    assert_eq!(cols, vec![("B", 10), ("A", 11), ("C", 12), ("D", 13)]);
}

#[test]
fn every_name_appears_exactly_once() {
    let products = vec![
        product("a", &[("Size", "M"), ("Size", "L"), ("Color", "Red")]),
        product("b", &[("Color", "Red"), ("Size", "S")]),
        product("c", &[]),
    ];
    let schema = UnifiedSchema::unify(&products);
    for p in &products {
        for a in &p.attributes {
            let hits = schema.names().iter().filter(|n| **n == a.name).count();
            assert_eq!(hits, 1, "{} should appear once", a.name);
        }
    }
    assert_eq!(schema.len(), 2);
}

#[test]
fn comparison_is_exact() {
    let products = vec![product("a", &[("Color", "1"), ("color", "2"), ("Color ", "3")])];
    let schema = UnifiedSchema::unify(&products);
    assert_eq!(schema.names(), &["Color", "color", "Color "]);
}

#[test]
fn unify_is_deterministic() {
    let products: Vec<ProductRecord> = (0..50)
        .map(|i| {
            let attrs: Vec<(String, String)> = (0..(i % 7))
                .map(|k| (format!("attr{}", (i * 31 + k) % 23), format!("v{k}")))
                .collect();
            let refs: Vec<(&str, &str)> = attrs.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
            product(&format!("u{i}"), &refs)
        })
        .collect();

    let first = UnifiedSchema::unify(&products);
    for _ in 0..10 {
        assert_eq!(UnifiedSchema::unify(&products), first);
    }
}

#[test]
fn empty_inputs_give_empty_schema() {
    let schema = UnifiedSchema::unify(&[]);
    assert!(schema.is_empty());
    assert_eq!(schema.width(), LEADING_COLUMNS);

    let schema = UnifiedSchema::unify(&[product("a", &[]), product("b", &[])]);
    assert!(schema.is_empty());
}
