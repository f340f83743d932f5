use ff_config::{ConfigError, ValidationError, from_yaml_str};
use ff_controls::ZeroLagCheck;
use ff_core::{CoreError, Tolerances};

const BASE: &str = r#"
acceptable_disturbance_range: [1.0, -1.0]
output_limit_range: [100.0, 0.0]
initial:
  disturbance: 0.0
  manipulated_variable: 50.0
"#;

#[test]
fn minimal_config_normalizes_ranges_and_defaults() {
    let config = from_yaml_str(BASE).unwrap();
    assert_eq!(config.acceptable_disturbance_range.as_tuple(), (-1.0, 1.0));
    assert_eq!(config.output_limit_range.as_tuple(), (0.0, 100.0));
    assert_eq!(config.parameters, None);
    assert_eq!(config.zero_lag_check, ZeroLagCheck::OnCorrection);

    let ff = config.build().unwrap();
    assert_eq!(ff.params().as_tuple(), (0.0, 0.0, 0.0));
}

#[test]
fn accepts_both_time_constant_namings() {
    let a = from_yaml_str(&format!(
        "{BASE}parameters:\n  gain: 2.0\n  lead: 1.0\n  lag: 2.0\n"
    ))
    .unwrap();
    let b = from_yaml_str(&format!(
        "{BASE}parameters:\n  gain: 2.0\n  system_time_constant: 1.0\n  disturbance_time_constant: 2.0\n"
    ))
    .unwrap();
    assert_eq!(a.parameters, b.parameters);
}

#[test]
fn zero_lag_rejected_at_setup() {
    let err = from_yaml_str(&format!(
        "{BASE}parameters:\n  gain: 2.0\n  lead_time_constant: 1.0\n  lag_time_constant: 0.0\n"
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::InvalidValue {
            field: "parameters.lag_time_constant",
            ..
        })
    ));
}

#[test]
fn every_call_check_parses() {
    let config = from_yaml_str(&format!("{BASE}zero_lag_check: every_call\n")).unwrap();
    assert_eq!(config.zero_lag_check, ZeroLagCheck::EveryCall);
    assert_eq!(config.build().unwrap().zero_lag_check(), ZeroLagCheck::EveryCall);
}

#[test]
fn negative_tolerance_rejected() {
    let err = from_yaml_str(&format!("{BASE}tolerances:\n  abs: -1.0\n  rel: 0.0\n")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::Tolerances(CoreError::InvalidArg { .. }))
    ));
}

#[test]
fn configured_tolerances_reach_the_compensator() {
    let config = from_yaml_str(&format!(
        "{BASE}parameters:\n  gain: 2.0\n  lead: 1.0\n  lag: 2.0\ntolerances:\n  abs: 1.0e-3\n  rel: 1.0e-9\n"
    ))
    .unwrap();
    let tol = Tolerances {
        abs: 1e-3,
        rel: 1e-9,
    };
    assert_eq!(config.tolerances, Some(tol));

    let mut ff = config.build().unwrap();
    assert_eq!(ff.tolerances(), tol);
    // Within 1e-3 of the band edge counts as outside.
    let u = ff.evaluate(50.0, 0.9995, 1.0).unwrap();
    assert_ne!(u, 50.0);
}

#[test]
fn wider_tolerance_rejects_tiny_lag_at_setup() {
    let tiny_lag = "parameters:\n  gain: 2.0\n  lead: 1.0\n  lag: 1.0e-6\n";
    assert!(from_yaml_str(&format!("{BASE}{tiny_lag}")).is_ok());

    let err = from_yaml_str(&format!(
        "{BASE}{tiny_lag}tolerances:\n  abs: 1.0e-3\n  rel: 1.0e-9\n"
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::InvalidValue {
            field: "parameters.lag_time_constant",
            ..
        })
    ));
}

#[test]
fn non_finite_rejected() {
    let yaml = BASE.replace("manipulated_variable: 50.0", "manipulated_variable: .nan");
    let err = from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::NonFinite { .. })
    ));
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let err = from_yaml_str("acceptable_disturbance_range: nope").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}
