//! Removed classes, objects, attributes and enum members

use super::{attribute_owners, renamed_member, CompatibilityFinding};
use crate::compare::{ChangedSchema, Difference};
use crate::validation::{Rule, RuleMetadata};

/// Reports records that disappeared between versions.
///
/// Classes and objects are checked at the top level. For records present on
/// both sides, removed attributes are reported, and so are removed enum
/// members of surviving attributes unless the enum lost and gained exactly
/// one member under the same caption, which
/// [`NoChangedIdentifiersRule`](super::NoChangedIdentifiersRule) reports as a
/// rename.
pub struct NoRemovedRecordsRule;

impl Rule<ChangedSchema, CompatibilityFinding> for NoRemovedRecordsRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("No removed records")
            .with_description("Classes, objects, attributes and enum members must not be removed")
    }

    fn validate(&self, context: &ChangedSchema) -> Vec<CompatibilityFinding> {
        let mut findings = Vec::new();

        for (name, diff) in &context.classes {
            if let Difference::Removed { before } = diff {
                findings.push(CompatibilityFinding::RemovedEvent {
                    name: name.clone(),
                    caption: before.caption.clone(),
                });
            }
        }

        for (name, diff) in &context.objects {
            if let Difference::Removed { before } = diff {
                findings.push(CompatibilityFinding::RemovedObject {
                    name: name.clone(),
                    caption: before.caption.clone(),
                });
            }
        }

        for owner in attribute_owners(context) {
            for (attr, diff) in owner.attributes {
                match diff {
                    Difference::Removed { before } => {
                        findings.push(CompatibilityFinding::RemovedAttr {
                            element: owner.element,
                            record: owner.name.to_string(),
                            attr: attr.clone(),
                            caption: before.caption.clone(),
                        });
                    }
                    Difference::Record(attr_diff) => {
                        let Some(members) = attr_diff.r#enum.entries() else {
                            continue;
                        };
                        if renamed_member(members).is_some() {
                            continue;
                        }
                        for (value, member) in members {
                            if let Difference::Removed { before } = member {
                                findings.push(CompatibilityFinding::RemovedEnumMember {
                                    element: owner.element,
                                    record: owner.name.to_string(),
                                    attr: attr.clone(),
                                    value: value.clone(),
                                    caption: before.caption.clone(),
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_schemas;
    use crate::schema::{
        OcsfAttr, OcsfElementType, OcsfEnumMember, OcsfEvent, OcsfObject, OcsfSchema,
    };
    use std::collections::BTreeMap;

    fn login() -> OcsfEvent {
        let mut login = OcsfEvent::new("login", "Login");
        let mut status = OcsfAttr {
            caption: Some("Status".into()),
            ..Default::default()
        };
        let mut members = BTreeMap::new();
        members.insert("1".to_string(), OcsfEnumMember::new("Success"));
        members.insert("2".to_string(), OcsfEnumMember::new("Failure"));
        status.r#enum = Some(members);
        login.attributes.insert("status".into(), status);
        login.attributes.insert(
            "user".into(),
            OcsfAttr {
                caption: Some("User".into()),
                ..Default::default()
            },
        );
        login
    }

    fn schema(classes: Vec<OcsfEvent>, objects: Vec<OcsfObject>) -> OcsfSchema {
        let mut schema = OcsfSchema::new("1.0.0");
        for class in classes {
            schema.classes.insert(class.name.clone(), class);
        }
        for object in objects {
            schema.objects.insert(object.name.clone(), object);
        }
        schema
    }

    #[test]
    fn test_removed_event_and_object() {
        let old = schema(vec![login()], vec![OcsfObject::new("device", "Device")]);
        let new = schema(vec![], vec![]);

        let findings = NoRemovedRecordsRule.validate(&compare_schemas(&old, &new));
        assert_eq!(
            findings,
            vec![
                CompatibilityFinding::RemovedEvent {
                    name: "login".into(),
                    caption: "Login".into()
                },
                CompatibilityFinding::RemovedObject {
                    name: "device".into(),
                    caption: "Device".into()
                },
            ]
        );
        assert_eq!(findings[0].to_string(), "Event login (Login) was removed");
    }

    #[test]
    fn test_removed_attribute_under_surviving_class() {
        let old = schema(vec![login()], vec![]);
        let mut changed = login();
        changed.attributes.remove("user");
        let new = schema(vec![changed], vec![]);

        let findings = NoRemovedRecordsRule.validate(&compare_schemas(&old, &new));
        assert_eq!(
            findings,
            vec![CompatibilityFinding::RemovedAttr {
                element: OcsfElementType::Event,
                record: "login".into(),
                attr: "user".into(),
                caption: Some("User".into()),
            }]
        );
    }

    #[test]
    fn test_removed_enum_member() {
        let old = schema(vec![login()], vec![]);
        let mut changed = login();
        if let Some(members) = changed
            .attributes
            .get_mut("status")
            .and_then(|attr| attr.r#enum.as_mut())
        {
            members.remove("2");
        }
        let new = schema(vec![changed], vec![]);

        let findings = NoRemovedRecordsRule.validate(&compare_schemas(&old, &new));
        assert_eq!(
            findings,
            vec![CompatibilityFinding::RemovedEnumMember {
                element: OcsfElementType::Event,
                record: "login".into(),
                attr: "status".into(),
                value: "2".into(),
                caption: "Failure".into(),
            }]
        );
    }

    #[test]
    fn test_unrelated_swap_reports_removed_member() {
        let old = schema(vec![login()], vec![]);
        let mut changed = login();
        if let Some(members) = changed
            .attributes
            .get_mut("status")
            .and_then(|attr| attr.r#enum.as_mut())
        {
            members.remove("2");
            members.insert("3".to_string(), OcsfEnumMember::new("Other"));
        }
        let new = schema(vec![changed], vec![]);

        let findings = NoRemovedRecordsRule.validate(&compare_schemas(&old, &new));
        assert_eq!(
            findings,
            vec![CompatibilityFinding::RemovedEnumMember {
                element: OcsfElementType::Event,
                record: "login".into(),
                attr: "status".into(),
                value: "2".into(),
                caption: "Failure".into(),
            }]
        );
    }

    #[test]
    fn test_added_records_are_not_reported() {
        let old = schema(vec![], vec![]);
        let new = schema(vec![login()], vec![OcsfObject::new("device", "Device")]);

        assert!(NoRemovedRecordsRule
            .validate(&compare_schemas(&old, &new))
            .is_empty());
    }
}
