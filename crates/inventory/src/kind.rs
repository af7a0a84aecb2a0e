use serde::{Deserialize, Serialize};

use stockwatch_core::{DomainError, DomainResult};

/// Closed set of clothing variants, each with one kind-specific attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    Shirt { size: String },
    Pants { material: String },
}

/// The kind-specific line of an item's detail block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificDetail<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

impl core::fmt::Display for SpecificDetail<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

impl ItemKind {
    pub fn shirt(size: impl Into<String>) -> Self {
        Self::Shirt { size: size.into() }
    }

    pub fn pants(material: impl Into<String>) -> Self {
        Self::Pants {
            material: material.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Shirt { .. } => "shirt",
            ItemKind::Pants { .. } => "pants",
        }
    }

    pub fn describe_specific(&self) -> SpecificDetail<'_> {
        match self {
            ItemKind::Shirt { size } => SpecificDetail {
                label: "Size",
                value: size,
            },
            ItemKind::Pants { material } => SpecificDetail {
                label: "Material",
                value: material,
            },
        }
    }

    pub(crate) fn validate(&self) -> DomainResult<()> {
        let detail = self.describe_specific();
        if detail.value.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "{} cannot be empty",
                detail.label.to_ascii_lowercase()
            )));
        }
        Ok(())
    }
}
