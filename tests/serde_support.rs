#![cfg(feature = "serde")]

use slow_query_log_analyzer::{
    MetaValue, Metadata, ParserConfig, QueryRecord, parse_queries_from_string,
};

#[test]
fn record_serializes_with_plain_values() {
    let log = "SET timestamp=1;\nSELECT 1 -- app/models/foo.rb:42\n# Query_time: 1.5  Rows_sent: 10  User: root\nSET timestamp=2;\n";
    let record = parse_queries_from_string(log).remove(0);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["sql"], "SELECT 1");
    assert_eq!(json["source"], "app/models/foo.rb:42");
    assert_eq!(json["metadata"]["Query_time"], 1.5);
    assert_eq!(json["metadata"]["Rows_sent"], 10);
    assert_eq!(json["metadata"]["User"], "root");

    let back: QueryRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn config_deserializes_from_json() {
    let config: ParserConfig = serde_json::from_str(
        r##"{"skip_keywords": ["SET"], "comment_marker": "# ", "flush_on_eof": true}"##,
    )
    .unwrap();
    assert_eq!(config, ParserConfig::default().with_skip_keywords(["SET"]).with_flush_on_eof(true));
}

#[test]
fn metadata_serializes_as_object_in_insertion_order() {
    let metadata: Metadata = [
        ("Rows_sent", MetaValue::Int(1)),
        ("Query_time", MetaValue::Float(2.5)),
        ("Host", MetaValue::from("web1")),
    ]
    .into_iter()
    .collect();

    let json = serde_json::to_string(&metadata).unwrap();
    assert_eq!(json, r#"{"Rows_sent":1,"Query_time":2.5,"Host":"web1"}"#);
}

#[test]
fn metadata_deserializes_object_and_later_key_wins() {
    let metadata: Metadata =
        serde_json::from_str(r#"{"Query_time":1,"Rows_sent":4,"Query_time":9}"#).unwrap();

    assert_eq!(metadata.len(), 2);
    assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["Query_time", "Rows_sent"]);
    assert_eq!(metadata.get("Query_time"), Some(&MetaValue::Int(9)));

    let record: QueryRecord = serde_json::from_str(
        r#"{"sql":"SELECT 1","source":null,"metadata":{"Query_time":1,"Query_time":9}}"#,
    )
    .unwrap();
    assert_eq!(record.query_time(), Some(9.0));
}

#[test]
fn metadata_rejects_pair_list() {
    assert!(serde_json::from_str::<Metadata>(r#"[["Query_time",1]]"#).is_err());
}
