use std::fs;

use criteria_core::config::CriteriaConfig;
use criteria_core::error::CriteriaError;
use criteria_core::prelude::*;
use criteria_core::sql::{SetOperationType, append_set_operands};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_load_config_file_drives_generation_and_set_operations() {
    init_tracing();

    let cfg_path = std::env::temp_dir().join(format!("criteria-core-{}.toml", std::process::id()));
    fs::write(
        &cfg_path,
        r#"
        [generator]
        conditional_true = "1 = 1"
        conditional_false = "1 = 0"
        parameter_rendering = "literal"

        [dialect]
        supports_except_all = false
        "#,
    )
    .unwrap();
    let config = CriteriaConfig::load(&cfg_path).unwrap();
    fs::remove_file(&cfg_path).unwrap();

    let empty = Expression::Parameter(
        ParameterExpression::named("ids").with_value(ParameterValue::Collection(vec![])),
    );
    let p = and(vec![eq(path("e.a"), number(1)), in_list(path("e.id"), vec![empty])]);
    let text = QueryGenerator::with_config(config.generator.clone())
        .generate_predicate(&p)
        .unwrap();
    assert_eq!(text, "e.a = 1 AND 1 = 0");

    let bound = Expression::Parameter(
        ParameterExpression::named("n").with_value(ParameterValue::Single(Literal::from(7))),
    );
    let text = QueryGenerator::with_config(config.generator)
        .generate_expression(&bound)
        .unwrap();
    assert_eq!(text, "7");

    let mut buffer = String::new();
    append_set_operands(
        &mut buffer,
        SetOperationType::ExceptAll,
        &["select a from A", "select a from B"],
        &config.dialect,
    );
    assert!(buffer.contains("row_number() over (partition by a)"), "{buffer}");
    assert!(buffer.contains("\nEXCEPT\n"), "{buffer}");
}

#[test]
fn test_missing_config_file_is_io_error() {
    init_tracing();

    let path = std::env::temp_dir().join("criteria-core-does-not-exist.toml");
    let err = CriteriaConfig::load(&path).unwrap_err();
    assert!(matches!(err, CriteriaError::Io(_)));
}
