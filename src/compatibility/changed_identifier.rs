use super::{changed_attributes, renamed_member, CompatibilityFinding};
use crate::compare::ChangedSchema;
use crate::validation::{Rule, RuleMetadata};

/// Reports enum values that were renamed.
///
/// An attribute enum that lost exactly one member and gained exactly one
/// with the same caption is read as a changed identifier, such as a new
/// `class_uid`. Any other removal is left to
/// [`NoRemovedRecordsRule`](super::NoRemovedRecordsRule).
pub struct NoChangedIdentifiersRule;

impl Rule<ChangedSchema, CompatibilityFinding> for NoChangedIdentifiersRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("No changed identifiers")
    }

    fn validate(&self, context: &ChangedSchema) -> Vec<CompatibilityFinding> {
        changed_attributes(context)
            .into_iter()
            .filter_map(|changed| {
                let members = changed.diff.r#enum.entries()?;
                let (before, after) = renamed_member(members)?;
                Some(CompatibilityFinding::ChangedIdentifier {
                    element: changed.element,
                    record: changed.record.to_string(),
                    attr: changed.attr.to_string(),
                    before: before.to_string(),
                    after: after.to_string(),
                })
            })
            .collect()
    }
}
