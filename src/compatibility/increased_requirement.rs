use super::{changed_attributes, CompatibilityFinding};
use crate::compare::{ChangedSchema, Difference};
use crate::validation::{Rule, RuleMetadata};

const REQUIRED: &str = "required";

/// Reports attributes whose requirement changed to `required`
pub struct NoIncreasedRequirementsRule;

impl Rule<ChangedSchema, CompatibilityFinding> for NoIncreasedRequirementsRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("No increased requirements")
    }

    fn validate(&self, context: &ChangedSchema) -> Vec<CompatibilityFinding> {
        changed_attributes(context)
            .into_iter()
            .filter_map(|changed| match &changed.diff.requirement {
                Difference::Changed {
                    before,
                    after: Some(after),
                } if after == REQUIRED => Some(CompatibilityFinding::IncreasedRequirement {
                    element: changed.element,
                    record: changed.record.to_string(),
                    attr: changed.attr.to_string(),
                    before: before.clone(),
                    after: after.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_schemas;
    use crate::schema::{OcsfAttr, OcsfElementType, OcsfObject, OcsfSchema};

    fn schema(requirement: Option<&str>) -> OcsfSchema {
        let mut device = OcsfObject::new("device", "Device");
        device.attributes.insert(
            "group".into(),
            OcsfAttr {
                caption: Some("Group".into()),
                requirement: requirement.map(String::from),
                ..Default::default()
            },
        );
        let mut schema = OcsfSchema::new("1.0.0");
        schema.objects.insert("device".into(), device);
        schema
    }

    fn findings(before: Option<&str>, after: Option<&str>) -> Vec<CompatibilityFinding> {
        let diff = compare_schemas(&schema(before), &schema(after));
        NoIncreasedRequirementsRule.validate(&diff)
    }

    #[test]
    fn test_absent_to_required() {
        assert_eq!(
            findings(None, Some("required")),
            vec![CompatibilityFinding::IncreasedRequirement {
                element: OcsfElementType::Object,
                record: "device".into(),
                attr: "group".into(),
                before: None,
                after: "required".into(),
            }]
        );
    }

    #[test]
    fn test_optional_to_required() {
        let found = findings(Some("optional"), Some("required"));
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].to_string(),
            "Requirement of Object device.group changed from optional to required"
        );
    }

    #[test]
    fn test_other_requirement_changes_are_allowed() {
        assert!(findings(Some("required"), Some("recommended")).is_empty());
        assert!(findings(Some("optional"), Some("recommended")).is_empty());
        assert!(findings(Some("required"), Some("required")).is_empty());
    }
}
