//! End-to-end compatibility checks over the fixture schemas

use std::collections::HashMap;
use std::path::PathBuf;

use ocsf_tools::compare::compare_schemas;
use ocsf_tools::compatibility::{
    check_compatibility, compatibility_validator, CompatibilityFinding, ExitStatus,
    NoChangedIdentifiersRule, NoChangedTypesRule, NoIncreasedRequirementsRule,
    NoRemovedRecordsRule,
};
use ocsf_tools::schema::{from_file, OcsfElementType, OcsfSchema};
use ocsf_tools::validation::{
    Finding, Severity, SeverityMap, ValidationFormatter, Validator,
};

fn fixture(version: &str) -> OcsfSchema {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("schema-{}.json", version));
    from_file(path).unwrap()
}

fn findings_of(
    results: &ocsf_tools::compatibility::CompatibilityResults,
    rule: &str,
) -> Vec<CompatibilityFinding> {
    results
        .get(rule)
        .unwrap()
        .findings
        .iter()
        .map(|f| f.finding.clone())
        .collect()
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_removed_records() {
    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &SeverityMap::new());

    assert_eq!(
        findings_of(&results, "No removed records"),
        vec![
            CompatibilityFinding::RemovedEvent {
                name: "login".into(),
                caption: "Login".into(),
            },
            CompatibilityFinding::RemovedObject {
                name: "legacy".into(),
                caption: "Legacy".into(),
            },
            CompatibilityFinding::RemovedAttr {
                element: OcsfElementType::Event,
                record: "authentication".into(),
                attr: "user".into(),
                caption: Some("User".into()),
            },
        ]
    );
}

#[test]
fn test_increased_requirement() {
    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &SeverityMap::new());

    assert_eq!(
        findings_of(&results, "No increased requirements"),
        vec![CompatibilityFinding::IncreasedRequirement {
            element: OcsfElementType::Event,
            record: "authentication".into(),
            attr: "group".into(),
            before: None,
            after: "required".into(),
        }]
    );
}

#[test]
fn test_changed_type() {
    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &SeverityMap::new());

    let findings = findings_of(&results, "No changed attribute types");
    assert_eq!(
        findings,
        vec![CompatibilityFinding::ChangedType {
            element: OcsfElementType::Event,
            record: "authentication".into(),
            attr: "status".into(),
            before: Some("int_t".into()),
            after: Some("string_t".into()),
        }]
    );
    assert_eq!(
        findings[0].message(),
        "Type of Event authentication.status changed from int_t to string_t"
    );
}

#[test]
fn test_renamed_identifier_is_one_finding() {
    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &SeverityMap::new());

    assert_eq!(
        findings_of(&results, "No changed identifiers"),
        vec![CompatibilityFinding::ChangedIdentifier {
            element: OcsfElementType::Event,
            record: "authentication".into(),
            attr: "status_id".into(),
            before: "-1".into(),
            after: "99".into(),
        }]
    );
    // the rename is not also reported as a removed enum member
    assert!(!results
        .findings()
        .any(|f| matches!(f.finding, CompatibilityFinding::RemovedEnumMember { .. })));
}

#[test]
fn test_unrelated_description_change_is_compatible() {
    let old = fixture("1.0.0");
    let mut new = old.clone();
    if let Some(class) = new.classes.get_mut("file_activity") {
        class.description = Some("Events about files.".into());
    }

    let results = check_compatibility(&old, &new, &SeverityMap::new());
    assert_eq!(results.total_findings(), 0);
    assert_eq!(results.count_severity(Severity::Error), 0);
    assert!(results.is_compatible());
    assert_eq!(ExitStatus::from_results(&results), ExitStatus::Compatible);

    let text = ValidationFormatter::plain().format(&results);
    assert_eq!(text.matches("  no findings\n").count(), 4);
}

#[test]
fn test_rule_order_does_not_change_findings() {
    let diff = compare_schemas(&fixture("1.0.0"), &fixture("1.1.0"));
    let severities = SeverityMap::new();

    let forward = compatibility_validator().validate(&diff, &severities);
    let reversed: Validator<_, CompatibilityFinding> = Validator::new()
        .with_rule(NoChangedIdentifiersRule)
        .with_rule(NoChangedTypesRule)
        .with_rule(NoIncreasedRequirementsRule)
        .with_rule(NoRemovedRecordsRule);
    let backward = reversed.validate(&diff, &severities);

    for rule in forward.iter() {
        assert_eq!(
            findings_of(&forward, rule.rule.name),
            findings_of(&backward, rule.rule.name)
        );
    }
}

// =============================================================================
// Severities and Output
// =============================================================================

#[test]
fn test_default_severities_are_incompatible() {
    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &SeverityMap::new());

    assert_eq!(results.count_severity(Severity::Error), 6);
    assert!(!results.is_compatible());
    assert_eq!(ExitStatus::from_results(&results).code(), 2);
}

#[test]
fn test_downgraded_severities_are_compatible() {
    let mut overrides = HashMap::new();
    for name in CompatibilityFinding::NAMES {
        overrides.insert(name.to_string(), "warning".to_string());
    }
    overrides.insert("ChangedType".to_string(), "info".to_string());
    let severities = SeverityMap::from_names::<CompatibilityFinding>(&overrides).unwrap();

    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &severities);
    assert_eq!(results.count_severity(Severity::Warning), 5);
    assert_eq!(results.count_severity(Severity::Info), 1);
    assert!(results.is_compatible());
    assert_eq!(ExitStatus::from_results(&results).code(), 0);
}

#[test]
fn test_formatted_report() {
    let mut overrides = HashMap::new();
    overrides.insert("RemovedAttr".to_string(), "fatal".to_string());
    let severities = SeverityMap::from_names::<CompatibilityFinding>(&overrides).unwrap();

    let results = check_compatibility(&fixture("1.0.0"), &fixture("1.1.0"), &severities);
    let text = ValidationFormatter::plain().format(&results);

    assert!(text.starts_with("No removed records\n==================\n"));
    assert!(text.contains("  [error] Event login (Login) was removed\n"));
    assert!(text.contains("  [error] Object legacy (Legacy) was removed\n"));
    assert!(text.contains("  [fatal] Attribute user (User) of Event authentication was removed\n"));
    assert!(text.contains(
        "  [error] Requirement of Event authentication.group changed from none to required\n"
    ));
    assert!(text.contains(
        "  [error] Identifier -1 of Event authentication.status_id changed to 99\n"
    ));
    assert!(!text.contains("no findings"));
}
