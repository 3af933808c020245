use slow_query_log_analyzer::{MetaValue, QueryParser, parse_queries_from_string};

#[test]
fn empty_input_yields_nothing() {
    assert!(parse_queries_from_string("").is_empty());
    assert!(parse_queries_from_string("\n\n").is_empty());
}

#[test]
fn preamble_without_skip_statement_yields_nothing() {
    let log = "SELECT 1\n# Query_time: 1\nSELECT 2\n# Query_time: 2\nSELECT 3\n";
    assert!(parse_queries_from_string(log).is_empty());
}

#[test]
fn last_line_without_newline_still_triggers_boundary() {
    let log = "SET timestamp=1;\nSELECT 1\n# Query_time: 3\nSET timestamp=2;";
    let records = parse_queries_from_string(log);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].query_time(), Some(3.0));
}

#[test]
fn blank_line_after_comment_block_is_not_a_record() {
    // 空行会进入 SQL 缓冲，但拼接后的 SQL 为空，不输出记录
    let log = "SET timestamp=1;\nSELECT 1\n# Query_time: 3\n\n# Query_time: 4\nSET timestamp=2;\n";
    let records = parse_queries_from_string(log);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sql, "SELECT 1");
}

#[test]
fn statement_without_comment_block_merges_into_next() {
    // 没有注释块的语句不会形成边界，会与下一条语句拼接
    let log = "SET timestamp=1;\nSELECT 1;\nSELECT 2;\n# Query_time: 1\nSET timestamp=2;\n";
    let records = parse_queries_from_string(log);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sql, "SELECT 1;\nSELECT 2;");
}

#[test]
fn invalid_utf8_is_replaced_not_fatal() {
    let mut bytes = b"SET timestamp=1;\nSELECT '".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"'\n# Query_time: 1\nSET timestamp=2;\n");

    let records: Vec<_> = QueryParser::new(bytes.as_slice())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].sql.starts_with("SELECT '"));
    assert!(records[0].sql.contains('\u{FFFD}'));
}

#[test]
fn malformed_comment_line_keeps_record() {
    let log = "SET timestamp=1;\nSELECT 1\n# garbage without fields\n# Rows_sent: 2\nSET timestamp=2;\n";
    let records = parse_queries_from_string(log);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metadata.len(), 1);
    assert_eq!(records[0].get("Rows_sent"), Some(&MetaValue::Int(2)));
    assert_eq!(records[0].query_time(), None);
}

#[test]
fn lowercase_skip_statements_are_ignored() {
    let log = "set timestamp=1;\nSELECT 1\nshow warnings;\nFROM dual\n# Query_time: 1\nanalyze table t;\n";
    let records = parse_queries_from_string(log);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sql, "SELECT 1\nFROM dual");
}
