use log_filter_sql::dialect::{DialectKind, MySql, Postgres, Sqlite};
use log_filter_sql::engine::{QueryEngine, compile, free_text_predicate, is_free_text, translate};
use log_filter_sql::error::ErrorKind;
use log_filter_sql::output::{error_json, to_json, translation_json};

fn sqlite(filter: &str) -> String {
    translate(filter, &Sqlite::new()).unwrap()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_property_match() {
    assert_eq!(
        sqlite("prob1 = 'value1'"),
        "id IN (SELECT logId FROM log_property GROUP BY logId HAVING SUM(name = 'prob1' AND value = 'value1') > 0)"
    );
}

#[test]
fn test_property_exclusion() {
    assert_eq!(
        sqlite("prob1 != 'value1'"),
        "id IN (SELECT logId FROM log_property GROUP BY logId HAVING SUM(name = 'prob1' AND value = 'value1') = 0)"
    );
}

#[test]
fn test_builtin_like() {
    assert_eq!(sqlite("@message like '%search%'"), "message LIKE '%search%'");
}

#[test]
fn test_mixed_properties_and_builtins() {
    assert_eq!(
        sqlite("prob1 = 'value1' or @message like '%search%' and prob2 != 'value2'"),
        "id IN (SELECT logId FROM log_property GROUP BY logId HAVING SUM(name = 'prob1' AND value = 'value1') > 0) \
         OR message LIKE '%search%' \
         AND id IN (SELECT logId FROM log_property GROUP BY logId HAVING SUM(name = 'prob2' AND value = 'value2') = 0)"
    );
}

#[test]
fn test_headline_example() {
    assert_eq!(
        sqlite("StatusCode >= 500 and UserName like '%admin%'"),
        "id IN (SELECT logId FROM log_property GROUP BY logId HAVING \
         SUM(name = 'StatusCode' AND CAST(value AS NUMERIC) >= 500) > 0 \
         AND SUM(name = 'UserName' AND value LIKE '%admin%') > 0)"
    );
}

// ============================================================================
// Free text
// ============================================================================

#[test]
fn test_bare_word_is_free_text() {
    assert_eq!(
        sqlite("search"),
        "(message LIKE '%search%' OR exception LIKE '%search%' OR id IN (SELECT logId FROM log_property WHERE value LIKE '%search%'))"
    );
}

#[test]
fn test_free_text_escapes_single_quotes() {
    assert_eq!(
        sqlite("'foo'"),
        "(message LIKE '%''foo''%' OR exception LIKE '%''foo''%' OR id IN (SELECT logId FROM log_property WHERE value LIKE '%''foo''%'))"
    );
}

#[test]
fn test_quoted_phrase_is_free_text() {
    let sql = sqlite("\"connection refused (pool=main)\"");
    assert!(sql.starts_with("(message LIKE '%connection refused (pool=main)%'"));
    assert!(!sql.contains('"'));
}

#[test]
fn test_free_text_uses_dialect_table() {
    let sql = free_text_predicate("x", &Sqlite::with_property_table("props").unwrap());
    assert!(sql.contains("SELECT logId FROM props WHERE value LIKE '%x%'"));
}

#[test]
fn test_mysql_free_text_escapes_backslashes() {
    assert_eq!(
        translate(r"x\'", &MySql::new()).unwrap(),
        r"(message LIKE '%x\\''%' OR exception LIKE '%x\\''%' OR id IN (SELECT logId FROM log_property WHERE value LIKE '%x\\''%'))"
    );
}

#[test]
fn test_mysql_string_literal_cannot_break_out() {
    let sql = translate(r"@message = 'x\'' or 1=1 -- ' and Code = 1", &MySql::new()).unwrap();
    assert!(sql.starts_with(r"message = 'x\\'' or 1=1 -- '"));
    assert!(sql.ends_with("AND id IN (SELECT logId FROM log_property GROUP BY logId HAVING SUM(name = 'Code' AND CAST(value AS DECIMAL(38,10)) = 1) > 0)"));
}

#[test]
fn test_free_text_detection_rules() {
    assert!(is_free_text("NullReferenceException"));
    assert!(is_free_text("code>5"));
    assert!(is_free_text("\"a = b\""));
    assert!(!is_free_text("a = b"));
    assert!(!is_free_text("a!=1"));
    assert!(!is_free_text("(a"));
}

#[test]
fn test_compile_skips_free_text() {
    assert!(compile("timeout").unwrap().is_none());
    assert!(compile("a = 1").unwrap().is_some());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_errors_propagate_unchanged() {
    let err = translate("p=p ", &Sqlite::new()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert_eq!(err.to_string(), "Error at position '3' -> p: expect literal");

    let err = translate("'v'=p and x = 1", &Sqlite::new()).unwrap_err();
    assert_eq!(err.to_string(), "Error at position '1' -> 'v': expect identifier");
}

#[test]
fn test_lexical_error_through_engine() {
    let err = translate("Message = 'open", &Sqlite::new()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert_eq!(err.to_string(), "Error at position '15': unterminated string");
}

#[test]
fn test_not_restriction_through_engine() {
    let err = translate("a not = 1", &Sqlite::new()).unwrap_err();
    assert_eq!(err.description, "'not' may only be used with 'like'");
}

#[test]
fn test_type_mismatch_through_engine() {
    assert!(translate("p like 5", &Sqlite::new()).is_err());
    assert!(translate("p not like 5", &Sqlite::new()).is_err());
    assert!(translate("p > 'five'", &Sqlite::new()).is_err());
}

// ============================================================================
// Engine and JSON output
// ============================================================================

#[test]
fn test_query_engine_binds_dialect() {
    let engine = QueryEngine::new(DialectKind::Postgres.build(Some("evt_prop")).unwrap());
    assert_eq!(engine.dialect().name(), "postgres");
    assert_eq!(
        engine.translate("Code = 'x'").unwrap(),
        "id IN (SELECT logId FROM evt_prop GROUP BY logId HAVING SUM(CASE WHEN name = 'Code' AND value = 'x' THEN 1 ELSE 0 END) > 0)"
    );
}

#[test]
fn test_translation_json_success() {
    let dialect = Postgres::new();
    let result = translate("@level = 'Error'", &dialect);
    let json = translation_json("@level = 'Error'", &dialect, &result);
    assert_eq!(json["sql"], "level = 'Error'");
    assert_eq!(json["dialect"], "postgres");
    assert_eq!(json["filter"], "@level = 'Error'");
}

#[test]
fn test_translation_json_error() {
    let dialect = Sqlite::new();
    let result = translate("a =", &dialect);
    let json = translation_json("a =", &dialect, &result);
    assert_eq!(json["error"], "Error at position '4': expect expression");
    assert_eq!(json["kind"], "syntax");
    assert_eq!(json["position"], 4);
    assert!(json["token"].is_null());
}

#[test]
fn test_error_json_compact() {
    let err = translate("p=p ", &Sqlite::new()).unwrap_err();
    let text = to_json(&error_json(&err), false).unwrap();
    assert!(text.contains("\"error\":\"Error at position '3' -> p: expect literal\""));
    assert!(text.contains("\"token\":\"p\""));
}
