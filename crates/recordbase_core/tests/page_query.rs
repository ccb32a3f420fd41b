use recordbase_core::PageQuery;

#[test]
fn page_query_serializes_with_stable_field_names() {
    let json = serde_json::to_value(PageQuery::new(2, 10)).unwrap();
    assert_eq!(json, serde_json::json!({ "page": 2, "page_size": 10 }));
}

#[test]
fn page_query_decodes_missing_window_as_unpaged() {
    let decoded: PageQuery =
        serde_json::from_value(serde_json::json!({ "page": null, "page_size": null })).unwrap();
    assert_eq!(decoded, PageQuery::unpaged());
}
