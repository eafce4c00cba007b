//! Tests for form validation and config normalization.
mod common;
use common::cond;
use jouken::prelude::*;

#[test]
fn test_delay_round_trip() {
    let mut form = FormState::new(DelayForm {
        duration_value: "30".to_string(),
        duration_unit: DurationUnit::Minutes,
        result_key: String::new(),
    });
    let Some(NodeConfig::Delay(config)) = form.submit() else {
        panic!("delay form should submit cleanly");
    };
    assert_eq!(config.delay_ms, 1_800_000);

    // Re-deriving the display form picks minutes again, not 1800 seconds.
    let reopened = DelayForm::from_config(&config);
    assert_eq!(reopened.duration_value, "30");
    assert_eq!(reopened.duration_unit, DurationUnit::Minutes);
}

#[test]
fn test_delay_clamps_to_seven_days() {
    let mut form = FormState::new(DelayForm {
        duration_value: "8".to_string(),
        duration_unit: DurationUnit::Days,
        result_key: String::new(),
    });
    let Some(NodeConfig::Delay(config)) = form.submit() else {
        panic!("delay form should submit cleanly");
    };
    assert_eq!(config.delay_ms, 604_800_000);

    assert_eq!(jouken::config::delay::to_delay_ms(-5.0, DurationUnit::Hours), 0);
    assert_eq!(jouken::config::delay::to_delay_ms(f64::NAN, DurationUnit::Hours), 0);
}

#[test]
fn test_delay_display_fallback_is_seconds() {
    // 1500 ms: no unit divides evenly.
    let (value, unit) = jouken::config::delay::derive_display(1_500);
    assert_eq!(unit, DurationUnit::Seconds);
    assert_eq!(value, 1.5);

    let (value, unit) = jouken::config::delay::derive_display(0);
    assert_eq!(unit, DurationUnit::Seconds);
    assert_eq!(value, 0.0);

    // A whole day prefers days over 86400 seconds.
    let (value, unit) = jouken::config::delay::derive_display(86_400_000);
    assert_eq!(unit, DurationUnit::Days);
    assert_eq!(value, 1.0);
}

#[test]
fn test_delay_rejects_non_numeric_input() {
    let mut form = FormState::new(DelayForm {
        duration_value: "soon".to_string(),
        duration_unit: DurationUnit::Seconds,
        result_key: String::new(),
    });
    assert!(form.submit().is_none());
    assert!(form.has_errors());
    assert!(form.error("durationValue").is_some());

    // Correcting the field clears its error and unblocks submission.
    form.update("durationValue", |v| v.duration_value = "5".to_string());
    assert!(form.error("durationValue").is_none());
    assert!(form.is_touched("durationValue"));
    assert!(form.submit().is_some());
}

#[test]
fn test_empty_optional_keys_are_omitted() {
    let mut form = FormState::new(FilterForm {
        source: PathSelection::Custom("items".to_string()),
        conditions: vec![],
        logical_operator: LogicalOperator::And,
        result_key: "   ".to_string(),
        fallback_key: String::new(),
    });
    let config = form.submit().expect("filter form should submit");
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["type"], "FILTER");
    assert_eq!(json["sourceKey"], "items");
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("resultKey"));
    assert!(!object.contains_key("fallbackKey"));
}

#[test]
fn test_custom_sentinel_never_persists() {
    assert_eq!(PathSelection::CUSTOM_SENTINEL, "__custom");

    // The sentinel marks "custom input selected, nothing typed yet".
    let unset = PathSelection::Preset("__custom".to_string());
    assert_eq!(unset.resolve(), None);
    let pasted = PathSelection::Custom("__custom".to_string());
    assert_eq!(pasted.resolve(), None);

    // A filter with only the sentinel has no source and fails validation.
    let mut form = FormState::new(FilterForm {
        source: unset,
        ..FilterForm::default()
    });
    assert!(form.submit().is_none());
    assert!(form.error("sourceKey").is_some());

    // Loop sources are optional, so the sentinel normalizes to "no key".
    let mut form = FormState::new(LoopForm {
        source: PathSelection::Preset("__custom".to_string()),
        ..LoopForm::default()
    });
    let Some(NodeConfig::Loop(config)) = form.submit() else {
        panic!("loop form should submit cleanly");
    };
    assert_eq!(config.source_key, None);
    let json = serde_json::to_value(&config).unwrap();
    assert!(!json.as_object().unwrap().contains_key("sourceKey"));
}

#[test]
fn test_loop_defaults_and_bounds() {
    let mut form = FormState::new(LoopForm {
        source: PathSelection::Custom("orders".to_string()),
        item_variable: "  ".to_string(),
        index_variable: String::new(),
        max_iterations: "50000".to_string(),
        ..LoopForm::default()
    });
    let Some(NodeConfig::Loop(config)) = form.submit() else {
        panic!("loop form should submit cleanly");
    };
    assert_eq!(config.item_variable, "item");
    assert_eq!(config.index_variable, "index");
    assert_eq!(config.max_iterations, Some(10_000));
}

#[test]
fn test_loop_rejects_malformed_iteration_count() {
    let mut form = FormState::new(LoopForm {
        max_iterations: "many".to_string(),
        ..LoopForm::default()
    });
    assert!(form.submit().is_none());
    assert!(form.error("maxIterations").is_some());
}

#[test]
fn test_query_normalization() {
    let mut form = FormState::new(QueryForm {
        model: "  Contact ".to_string(),
        filters: vec![
            Condition {
                field: " status ".to_string(),
                operator: Operator::Equals,
                value: Some(" active ".to_string()),
                negate: Some(false),
            },
        ],
        limit: "99999".to_string(),
        offset: "not a number".to_string(),
        order_by: vec![
            OrderBy {
                field: "createdAt".to_string(),
                direction: SortDirection::Desc,
            },
            OrderBy {
                field: "  ".to_string(),
                direction: SortDirection::Asc,
            },
        ],
        select: vec!["name".to_string(), "".to_string()],
        ..QueryForm::default()
    });
    let Some(NodeConfig::Query(config)) = form.submit() else {
        panic!("query form should submit cleanly");
    };
    assert_eq!(config.model, "Contact");
    assert_eq!(config.filters[0].field, "status");
    assert_eq!(config.filters[0].value.as_deref(), Some("active"));
    assert_eq!(config.filters[0].negate, None, "negate=false is not persisted");
    assert_eq!(config.limit, Some(10_000));
    assert_eq!(config.offset, None, "unparsable numeric input clears the field");
    assert_eq!(config.order_by.as_ref().unwrap().len(), 1);
    assert_eq!(config.select.as_deref(), Some(&["name".to_string()][..]));
    assert_eq!(config.include, None);
}

#[test]
fn test_query_requires_model_and_filter_fields() {
    let mut form = FormState::new(QueryForm {
        filters: vec![cond("", Operator::Equals, Some("x"))],
        ..QueryForm::default()
    });
    assert!(form.submit().is_none());
    assert!(form.error("model").is_some());
    assert!(form.error("filters").is_some());
}

#[test]
fn test_condition_form_allows_zero_conditions() {
    let mut form = FormState::new(ConditionForm::default());
    let Some(NodeConfig::Condition(config)) = form.submit() else {
        panic!("an empty condition form is a valid always-pass node");
    };
    assert!(config.conditions.is_empty());
    assert!(config.evaluate(&serde_json::json!({})));
}

#[test]
fn test_trigger_and_action_forms() {
    let mut form = FormState::new(TriggerForm::default());
    assert!(form.submit().is_none());
    form.update("event", |v| v.event = " contact.created ".to_string());
    let Some(NodeConfig::Trigger(config)) = form.submit() else {
        panic!("trigger form should submit cleanly");
    };
    assert_eq!(config.event, "contact.created");

    let mut form = FormState::new(EmailActionForm {
        to: "{{contact.email}}".to_string(),
        subject: "".to_string(),
        body: "Hi {{contact.firstName}}".to_string(),
        result_key: String::new(),
    });
    let Some(NodeConfig::Action(ActionConfig::Email { subject, .. })) = form.submit() else {
        panic!("email form should submit cleanly");
    };
    assert_eq!(subject, None);

    let mut form = FormState::new(SmsActionForm::default());
    assert!(form.submit().is_none());
    assert!(form.error("to").is_some());
    assert!(form.error("body").is_some());
}
