use memchr::memmem;
use serde::{Deserialize, Serialize};

use crate::cmark::List;

const NAME_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    Boolean,
    Number,
    String,
}

/// A root or nested list of documented arguments or attributes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttributeList {
    /// Items in document order.
    pub items: Vec<SchemaAttributeListItem>,
}

/// A single documented argument or attribute, written as
/// `` `name` - (Required, Forces new) Description``.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttributeListItem {
    pub name: String,
    pub requirement: Option<Requirement>,
    pub attribute_type: Option<AttributeType>,
    pub force_new: bool,
    pub description: String,
}

impl SchemaAttributeList {
    /// Extract the items of `list`. Items whose text does not follow the `name - description`
    /// form are skipped. Nested lists are not visited.
    pub fn from_list(list: &List) -> Self {
        let items = list
            .items
            .iter()
            .filter_map(|item| item.first_text())
            .filter_map(SchemaAttributeListItem::parse)
            .collect();

        Self { items }
    }

    pub fn is_sorted_by_name(&self) -> bool {
        self.items
            .windows(2)
            .all(|pair| pair[0].name.as_bytes() <= pair[1].name.as_bytes())
    }
}

impl SchemaAttributeListItem {
    /// Parse the text of a list item. Returns `None` if the text has no ` - ` separator.
    pub fn parse(text: &str) -> Option<Self> {
        let separator = memmem::find(text.as_bytes(), NAME_SEPARATOR.as_bytes())?;
        let name = &text[..separator];
        let full_description = &text[separator + NAME_SEPARATOR.len()..];

        let mut item = SchemaAttributeListItem {
            name: String::from(name),
            ..Default::default()
        };

        let Some((traits, description)) = split_traits(full_description) else {
            item.description = String::from(full_description.trim());
            return Some(item);
        };

        item.description = String::from(description.trim());

        for schema_trait in traits.split(',').map(str::trim) {
            match schema_trait {
                "Boolean" => item.attribute_type = Some(AttributeType::Boolean),
                "Number" => item.attribute_type = Some(AttributeType::Number),
                "String" => item.attribute_type = Some(AttributeType::String),
                "Forces new" | "Forces new resource" => item.force_new = true,
                "Optional" => item.requirement = Some(Requirement::Optional),
                "Required" => item.requirement = Some(Requirement::Required),
                _ => (), // Unknown traits are left for future conventions.
            }
        }

        Some(item)
    }
}

/// Split `(traits) description` into its parts. Text without a leading, closed
/// parenthesis has no traits.
fn split_traits(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('(')?;
    let end = memchr::memchr(b')', rest.as_bytes())?;

    Some((&rest[..end], &rest[end + 1..]))
}
