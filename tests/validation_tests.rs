mod test_utils;

use name_advisor::config::{
    ConfigError, EnvSnapshot, ResolvedConfig,
    validation::{self, ViolationKind},
    variables::{self, VarKind},
};
use test_utils::{complete_snapshot, snapshot_with};

const LLM_LINE: &str =
    "At least one LLM API key is required (OPENAI_API_KEY or ANTHROPIC_API_KEY)";

fn failure_lines(env: &EnvSnapshot) -> Vec<String> {
    match validation::validate(env) {
        Err(ConfigError::EnvironmentValidationFailed(report)) => report.lines(),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn complete_environment_passes() {
    validation::validate(&complete_snapshot()).expect("complete environment is valid");
}

#[test]
fn either_llm_key_satisfies_cross_field_rule() {
    let anthropic_only = snapshot_with(&[("OPENAI_API_KEY", ""), ("ANTHROPIC_API_KEY", "sk-ant")]);
    assert!(validation::validate(&anthropic_only).is_ok());
}

#[test]
fn empty_environment_lists_every_required_variable_in_order() {
    let lines = failure_lines(&EnvSnapshot::default());

    let mut expected: Vec<String> = variables::VARIABLES
        .iter()
        .filter(|var| var.required)
        .map(|var| format!("Missing required environment variable: {}", var.name))
        .collect();
    expected.push(LLM_LINE.to_string());

    assert_eq!(lines, expected);
    assert_eq!(lines.len(), 12);
}

#[test]
fn each_missing_required_variable_is_reported_alone() {
    for var in variables::VARIABLES.iter().filter(|var| var.required) {
        let lines = failure_lines(&snapshot_with(&[(var.name, "")]));
        assert_eq!(
            lines,
            vec![format!("Missing required environment variable: {}", var.name)]
        );
    }
}

#[test]
fn non_numeric_values_are_reported_once_with_value() {
    for var in variables::VARIABLES
        .iter()
        .filter(|var| var.kind == VarKind::Number)
    {
        let lines = failure_lines(&snapshot_with(&[(var.name, "twenty")]));
        assert_eq!(lines, vec![format!("{} must be a number, got: twenty", var.name)]);
    }
}

#[test]
fn numeric_literals_in_js_forms_are_accepted() {
    for value in ["25", "2.5", "1e2", "0x14", " 30 "] {
        let env = snapshot_with(&[("RATE_LIMIT_PER_MINUTE", value)]);
        assert!(validation::validate(&env).is_ok(), "{value:?} should validate");
    }
}

#[test]
fn missing_llm_keys_add_cross_field_line() {
    let lines = failure_lines(&snapshot_with(&[("OPENAI_API_KEY", "")]));
    assert_eq!(lines, vec![LLM_LINE.to_string()]);
}

#[test]
fn violations_accumulate_across_rules() {
    let env = snapshot_with(&[
        ("NEXT_PUBLIC_FIREBASE_APP_ID", ""),
        ("NEXT_PUBLIC_DEFAULT_CREDITS", "lots"),
        ("OPENAI_API_KEY", ""),
    ]);
    let report = validation::check_rules(&variables::default_rules(), &env).unwrap();

    let kinds: Vec<_> = report.violations.iter().map(|v| v.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::Missing,
            ViolationKind::NotANumber {
                value: "lots".to_string()
            },
            ViolationKind::NoneOf {
                label: "LLM API key".to_string(),
                keys: vec!["OPENAI_API_KEY".to_string(), "ANTHROPIC_API_KEY".to_string()]
            },
        ]
    );
}

#[test]
fn startup_check_is_skipped_in_test_mode() {
    let env: EnvSnapshot = [("NODE_ENV", "test")].into_iter().collect();
    assert!(validation::startup_check(&env).is_ok());

    let env: EnvSnapshot = [("NODE_ENV", "staging")].into_iter().collect();
    assert!(validation::startup_check(&env).is_err());
}

#[test]
fn validated_environment_resolves() {
    let env = snapshot_with(&[("NEXT_PUBLIC_APP_URL", "")]);
    validation::validate(&env).unwrap();

    let config = ResolvedConfig::from_env(&env).unwrap();
    assert_eq!(config.app.url, "http://localhost:3000");
    assert_eq!(config.app.credit_cost_per_query, 10);
}

#[test]
fn every_validated_number_resolves() {
    for (value, expected) in [("25", 25), ("2.5", 2), ("1e2", 1), ("0x14", 20), (" 30 ", 30)] {
        let env = snapshot_with(&[("RATE_LIMIT_PER_HOUR", value)]);
        validation::validate(&env).unwrap();

        let config = ResolvedConfig::from_env(&env).unwrap();
        assert_eq!(config.rate_limit.per_hour, expected, "{value:?}");
    }
}

#[test]
fn numbers_without_leading_integer_fail_validation() {
    for value in [".5", "Infinity", "-4", "  ", "99999999999"] {
        let env = snapshot_with(&[("RATE_LIMIT_PER_HOUR", value)]);
        assert_eq!(
            failure_lines(&env),
            vec![format!("RATE_LIMIT_PER_HOUR must be a number, got: {value}")]
        );
        assert!(matches!(
            ResolvedConfig::from_env(&env),
            Err(ConfigError::InvalidConfiguration { ref key, .. }) if key == "RATE_LIMIT_PER_HOUR"
        ));
    }
}
