//! Backward-compatibility rules for OCSF schemas
//!
//! Each rule queries the difference of an old and a new schema and reports
//! changes that can break existing producers or consumers of events:
//! removed records, attributes or enum members, attributes that became
//! required, attributes whose type changed and renamed identifiers.

mod changed_identifier;
mod changed_type;
mod increased_requirement;
mod removed_records;

use serde::Serialize;
use std::fmt;

pub use changed_identifier::NoChangedIdentifiersRule;
pub use changed_type::NoChangedTypesRule;
pub use increased_requirement::NoIncreasedRequirementsRule;
pub use removed_records::NoRemovedRecordsRule;

use crate::compare::{compare_schemas, ChangedAttr, ChangedSchema, DiffMap, Difference};
use crate::schema::{OcsfAttr, OcsfElementType, OcsfEnumMember, OcsfSchema};
use crate::validation::{Finding, SeverityMap, ValidationResults, Validator};

/// Validator over schema differences
pub type CompatibilityValidator = Validator<ChangedSchema, CompatibilityFinding>;

/// Validation results of a compatibility check
pub type CompatibilityResults = ValidationResults<CompatibilityFinding>;

/// A backward-incompatible change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding")]
pub enum CompatibilityFinding {
    RemovedEvent {
        name: String,
        caption: String,
    },
    RemovedObject {
        name: String,
        caption: String,
    },
    /// `Attribute <attr> (<caption>) of <Element> <record> was removed`; the
    /// caption part is left out when the attribute had none
    RemovedAttr {
        element: OcsfElementType,
        record: String,
        attr: String,
        caption: Option<String>,
    },
    RemovedEnumMember {
        element: OcsfElementType,
        record: String,
        attr: String,
        value: String,
        caption: String,
    },
    /// `Requirement of <Element> <record>.<attr> changed from <before> to <after>`,
    /// with an absent `before` written as `none`
    IncreasedRequirement {
        element: OcsfElementType,
        record: String,
        attr: String,
        before: Option<String>,
        after: String,
    },
    /// Absent types are written as `none`
    ChangedType {
        element: OcsfElementType,
        record: String,
        attr: String,
        before: Option<String>,
        after: Option<String>,
    },
    ChangedIdentifier {
        element: OcsfElementType,
        record: String,
        attr: String,
        before: String,
        after: String,
    },
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}

impl Finding for CompatibilityFinding {
    const NAMES: &'static [&'static str] = &[
        "RemovedEvent",
        "RemovedObject",
        "RemovedAttr",
        "RemovedEnumMember",
        "IncreasedRequirement",
        "ChangedType",
        "ChangedIdentifier",
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::RemovedEvent { .. } => "RemovedEvent",
            Self::RemovedObject { .. } => "RemovedObject",
            Self::RemovedAttr { .. } => "RemovedAttr",
            Self::RemovedEnumMember { .. } => "RemovedEnumMember",
            Self::IncreasedRequirement { .. } => "IncreasedRequirement",
            Self::ChangedType { .. } => "ChangedType",
            Self::ChangedIdentifier { .. } => "ChangedIdentifier",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::RemovedEvent { name, caption } => {
                format!("Event {} ({}) was removed", name, caption)
            }
            Self::RemovedObject { name, caption } => {
                format!("Object {} ({}) was removed", name, caption)
            }
            Self::RemovedAttr {
                element,
                record,
                attr,
                caption,
            } => match caption {
                Some(caption) => format!(
                    "Attribute {} ({}) of {} {} was removed",
                    attr, caption, element, record
                ),
                None => format!("Attribute {} of {} {} was removed", attr, element, record),
            },
            Self::RemovedEnumMember {
                element,
                record,
                attr,
                value,
                caption,
            } => format!(
                "Enum member {} ({}) of {} {}.{} was removed",
                value, caption, element, record, attr
            ),
            Self::IncreasedRequirement {
                element,
                record,
                attr,
                before,
                after,
            } => format!(
                "Requirement of {} {}.{} changed from {} to {}",
                element,
                record,
                attr,
                or_none(before),
                after
            ),
            Self::ChangedType {
                element,
                record,
                attr,
                before,
                after,
            } => format!(
                "Type of {} {}.{} changed from {} to {}",
                element,
                record,
                attr,
                or_none(before),
                or_none(after)
            ),
            Self::ChangedIdentifier {
                element,
                record,
                attr,
                before,
                after,
            } => format!(
                "Identifier {} of {} {}.{} changed to {}",
                before, element, record, attr, after
            ),
        }
    }
}

impl fmt::Display for CompatibilityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// The default rule set, in reporting order
pub fn compatibility_validator() -> CompatibilityValidator {
    Validator::new()
        .with_rule(NoRemovedRecordsRule)
        .with_rule(NoIncreasedRequirementsRule)
        .with_rule(NoChangedTypesRule)
        .with_rule(NoChangedIdentifiersRule)
}

/// Compare two schemas and run the default rules over the difference
pub fn check_compatibility(
    before: &OcsfSchema,
    after: &OcsfSchema,
    severities: &SeverityMap,
) -> CompatibilityResults {
    let diff = compare_schemas(before, after);
    compatibility_validator().validate(&diff, severities)
}

/// Process exit status of a compatibility run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// No error or fatal findings
    Compatible,
    /// The check could not run
    Failed,
    /// At least one error or fatal finding
    Incompatible,
}

impl ExitStatus {
    pub fn from_results(results: &CompatibilityResults) -> Self {
        if results.is_compatible() {
            ExitStatus::Compatible
        } else {
            ExitStatus::Incompatible
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Compatible => 0,
            ExitStatus::Failed => 1,
            ExitStatus::Incompatible => 2,
        }
    }
}

/// A class, object or base event whose attributes were compared
#[derive(Clone, Copy)]
pub(crate) struct AttributeOwner<'a> {
    pub element: OcsfElementType,
    pub name: &'a str,
    pub attributes: &'a DiffMap<OcsfAttr>,
}

/// An attribute present on both sides of the comparison
pub(crate) struct ChangedAttribute<'a> {
    pub element: OcsfElementType,
    pub record: &'a str,
    pub attr: &'a str,
    pub diff: &'a ChangedAttr,
}

/// Classes, objects and the base event present on both sides
pub(crate) fn attribute_owners(schema: &ChangedSchema) -> Vec<AttributeOwner<'_>> {
    let classes = schema.classes.iter().filter_map(|(name, diff)| {
        diff.record().map(|event| AttributeOwner {
            element: OcsfElementType::Event,
            name,
            attributes: &event.attributes,
        })
    });
    let objects = schema.objects.iter().filter_map(|(name, diff)| {
        diff.record().map(|object| AttributeOwner {
            element: OcsfElementType::Object,
            name,
            attributes: &object.attributes,
        })
    });
    let base_event = schema.base_event.record().map(|event| AttributeOwner {
        element: OcsfElementType::Event,
        name: "base_event",
        attributes: &event.attributes,
    });

    classes.chain(objects).chain(base_event).collect()
}

pub(crate) fn changed_attributes(schema: &ChangedSchema) -> Vec<ChangedAttribute<'_>> {
    attribute_owners(schema)
        .into_iter()
        .flat_map(|owner| {
            let AttributeOwner {
                element,
                name,
                attributes,
            } = owner;
            attributes.iter().filter_map(move |(attr, diff)| {
                diff.record().map(|diff| ChangedAttribute {
                    element,
                    record: name,
                    attr,
                    diff,
                })
            })
        })
        .collect()
}

/// The removed and added keys of an enum that lost exactly one member and
/// gained exactly one with the same caption
pub(crate) fn renamed_member(enum_diff: &DiffMap<OcsfEnumMember>) -> Option<(&str, &str)> {
    let mut removed = enum_diff
        .iter()
        .filter(|(_, diff)| matches!(diff, Difference::Removed { .. }));
    let mut added = enum_diff
        .iter()
        .filter(|(_, diff)| matches!(diff, Difference::Added { .. }));

    match (removed.next(), removed.next(), added.next(), added.next()) {
        (
            Some((before, Difference::Removed { before: old })),
            None,
            Some((after, Difference::Added { after: new })),
            None,
        ) if old.caption == new.caption => Some((before.as_str(), after.as_str())),
        _ => None,
    }
}
