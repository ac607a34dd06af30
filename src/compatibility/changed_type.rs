use super::{changed_attributes, CompatibilityFinding};
use crate::compare::ChangedSchema;
use crate::validation::{Rule, RuleMetadata};

/// Reports attributes whose `type` changed
pub struct NoChangedTypesRule;

impl Rule<ChangedSchema, CompatibilityFinding> for NoChangedTypesRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("No changed attribute types")
    }

    fn validate(&self, context: &ChangedSchema) -> Vec<CompatibilityFinding> {
        changed_attributes(context)
            .into_iter()
            .filter_map(|changed| {
                let (before, after) = changed.diff.r#type.changed()?;
                Some(CompatibilityFinding::ChangedType {
                    element: changed.element,
                    record: changed.record.to_string(),
                    attr: changed.attr.to_string(),
                    before: before.clone(),
                    after: after.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_schemas;
    use crate::schema::{OcsfAttr, OcsfElementType, OcsfEvent, OcsfSchema};

    fn schema(status_type: &str) -> OcsfSchema {
        let mut base = OcsfEvent::new("base_event", "Base Event");
        base.attributes.insert(
            "status".into(),
            OcsfAttr {
                caption: Some("A".into()),
                r#type: Some(status_type.into()),
                ..Default::default()
            },
        );
        let mut schema = OcsfSchema::new("1.0.0");
        schema.classes.insert("login".into(), base.clone());
        schema.base_event = Some(base);
        schema
    }

    #[test]
    fn test_changed_type_in_classes_and_base_event() {
        let diff = compare_schemas(&schema("int_t"), &schema("string_t"));
        let findings = NoChangedTypesRule.validate(&diff);

        assert_eq!(
            findings,
            vec![
                CompatibilityFinding::ChangedType {
                    element: OcsfElementType::Event,
                    record: "login".into(),
                    attr: "status".into(),
                    before: Some("int_t".into()),
                    after: Some("string_t".into()),
                },
                CompatibilityFinding::ChangedType {
                    element: OcsfElementType::Event,
                    record: "base_event".into(),
                    attr: "status".into(),
                    before: Some("int_t".into()),
                    after: Some("string_t".into()),
                },
            ]
        );
        assert_eq!(
            findings[0].to_string(),
            "Type of Event login.status changed from int_t to string_t"
        );
    }

    #[test]
    fn test_unchanged_type() {
        let diff = compare_schemas(&schema("int_t"), &schema("int_t"));
        assert!(NoChangedTypesRule.validate(&diff).is_empty());
    }
}
