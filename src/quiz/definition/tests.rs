use serde_json::json;
use std::path::PathBuf;

use super::*;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn truthy_text_rejects_falsy_values() {
    assert_eq!(truthy_text(None), None);
    assert_eq!(truthy_text(Some(&json!(null))), None);
    assert_eq!(truthy_text(Some(&json!(false))), None);
    assert_eq!(truthy_text(Some(&json!(0))), None);
    assert_eq!(truthy_text(Some(&json!(0.0))), None);
    assert_eq!(truthy_text(Some(&json!(""))), None);
}

#[test]
fn truthy_text_keeps_present_values() {
    assert_eq!(truthy_text(Some(&json!("a"))), Some("a".to_owned()));
    assert_eq!(truthy_text(Some(&json!("0"))), Some("0".to_owned()));
    assert_eq!(truthy_text(Some(&json!(12))), Some("12".to_owned()));
    assert_eq!(truthy_text(Some(&json!(true))), Some("true".to_owned()));
}

#[test]
fn csv_rows_keep_column_order_and_text() {
    let sheet = "condition2,condition1,recommendation\n007,a,R1\n,b,R2\n";
    let rows = read_csv_rows(sheet.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    let fields: Vec<&str> = rows[0].keys().map(|k| k.as_str()).collect();
    assert_eq!(fields, vec!["condition2", "condition1", "recommendation"]);
    assert_eq!(rows[0]["condition2"], json!("007"));
    assert_eq!(rows[1]["condition2"], json!(""));
}

#[test]
fn csv_short_row_is_skipped_without_failing_the_sheet() {
    let sheet = "id,question,option_label,option_value\nq1,Q1?,A\nq1,Q1?,B,b\n";
    let rows = read_csv_rows(sheet.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].get("option_value").is_none());

    let questions = normalize_questions(QuestionInput::RawRows(rows));
    assert_eq!(questions.len(), 1);
    assert_eq!(
        questions[0].options,
        vec![AnswerOption {
            label: "B".to_owned(),
            value: "b".to_owned()
        }]
    );
}

#[test]
fn csv_long_row_drops_unnamed_cells() {
    let sheet = "condition1,recommendation\na,R1,stray\n";
    let rows = read_csv_rows(sheet.as_bytes()).unwrap();
    let fields: Vec<&str> = rows[0].keys().map(|k| k.as_str()).collect();
    assert_eq!(fields, vec!["condition1", "recommendation"]);
}

#[test]
fn csv_repeated_headers_keep_every_cell() {
    let sheet = "condition,condition,condition,recommendation\na,b,c,R1\n";
    let rows = read_csv_rows(sheet.as_bytes()).unwrap();
    let fields: Vec<&str> = rows[0].keys().map(|k| k.as_str()).collect();
    assert_eq!(
        fields,
        vec!["condition", "condition_1", "condition_2", "recommendation"]
    );

    let rules = normalize_rules(RuleInput::RawRows(rows));
    assert_eq!(
        rules[0].conditions,
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]
    );
}

#[test]
fn json_rows_require_an_array() {
    assert!(read_json_rows::<RawRow, _>(r#"{"id": "q1"}"#.as_bytes()).is_err());
    assert!(read_json_rows::<RawRow, _>("not json".as_bytes()).is_err());
    assert!(read_json_rows::<RawRow, _>("[1, 2]".as_bytes()).is_err());
    assert_eq!(
        read_json_rows::<RawRow, _>("[]".as_bytes()).unwrap(),
        Vec::<RawRow>::new()
    );
}

#[test]
fn json_rows_in_grouped_shape() {
    let document = r#"[{"conditions": ["a", 2], "recommendation": "R"}]"#;
    let rules = read_json_rows::<RecommendationRule, _>(document.as_bytes()).unwrap();
    assert_eq!(rules[0].conditions, vec!["a".to_owned(), "2".to_owned()]);
}

#[test]
fn opens_sample_spreadsheet() {
    let source = DataSource::Spreadsheet {
        questions: data_path("questions.csv"),
        recommendations: data_path("recommendations.csv"),
    };
    let definition = QuizDefinition::open(&source).unwrap();
    assert_eq!(definition.get_questions().len(), 3);
    assert_eq!(definition.get_questions()[0].options.len(), 3);
    assert_eq!(definition.get_rules().len(), 5);
    assert_eq!(
        definition.get_rules()[0].conditions,
        vec!["child".to_owned(), "financial".to_owned()]
    );
}

#[test]
fn spreadsheet_and_json_samples_agree() {
    let spreadsheet = QuizDefinition::open(&DataSource::Spreadsheet {
        questions: data_path("questions.csv"),
        recommendations: data_path("recommendations.csv"),
    })
    .unwrap();
    let json = QuizDefinition::open(&DataSource::Json {
        questions: data_path("questions.json"),
        recommendations: data_path("recommendations.json"),
        question_shape: Shape::Rows,
        rule_shape: Shape::Rows,
    })
    .unwrap();
    assert_eq!(spreadsheet, json);
}

#[test]
fn opens_grouped_json() {
    let source = DataSource::Json {
        questions: data_path("grouped/questions.json"),
        recommendations: data_path("grouped/recommendations.json"),
        question_shape: Shape::Grouped,
        rule_shape: Shape::Grouped,
    };
    let definition = QuizDefinition::open(&source).unwrap();
    assert_eq!(definition.get_questions()[1].id, "2");
    assert_eq!(definition.get_questions()[1].options[1].value, "0");
    assert_eq!(
        definition.get_rules()[0].conditions,
        vec!["senior".to_owned(), "0".to_owned()]
    );
}

#[test]
fn wrong_declared_shape_fails_to_load() {
    let source = DataSource::Json {
        questions: data_path("questions.json"),
        recommendations: data_path("recommendations.json"),
        question_shape: Shape::Grouped,
        rule_shape: Shape::Rows,
    };
    assert!(QuizDefinition::open(&source).is_err());
}

#[test]
fn missing_file_fails_to_load() {
    let source = DataSource::Spreadsheet {
        questions: data_path("does-not-exist.csv"),
        recommendations: data_path("recommendations.csv"),
    };
    let error = QuizDefinition::open(&source).unwrap_err();
    assert!(format!("{:#}", error).contains("does-not-exist.csv"));
}
