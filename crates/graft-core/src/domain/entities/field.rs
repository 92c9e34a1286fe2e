//! Field descriptors for request and response messages.
//!
//! A [`FieldList`] owns positions: a field's position is always its 1-based
//! index in the list, so positions can never collide. The synthetic
//! pagination field, when requested, sits at `len + 1`.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    entities::naming::CaseVariants, error::DomainError, value_objects::FieldKind,
};

/// Name of the synthetic trailing field of paginated operations.
pub const PAGINATION_FIELD: &str = "pagination";

/// One typed field of a request or response message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    name: CaseVariants,
    kind: FieldKind,
    position: u32,
}

impl Field {
    /// Parse `name` or `name:type`. A bare name is a string field.
    ///
    /// The returned field has position 0 until it joins a [`FieldList`].
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let default = FieldKind::default();
        let (name, kind) = match token.split_once(':') {
            Some((name, kind)) => {
                if kind.contains(':') {
                    return Err(DomainError::MalformedField {
                        token: token.to_string(),
                        reason: "expected a single ':' between name and type".into(),
                    });
                }
                (name, kind)
            }
            None => (token, default.as_str()),
        };

        let kind = FieldKind::from_str(kind).map_err(|e| match e {
            DomainError::UnknownFieldType { token, .. } => DomainError::UnknownFieldType {
                field: name.to_string(),
                token,
            },
            other => other,
        })?;

        Self::new(name, kind)
    }

    pub fn new(name: &str, kind: FieldKind) -> Result<Self, DomainError> {
        if let FieldKind::Custom(type_name) = &kind {
            CaseVariants::new(type_name.as_str())?;
        }
        Ok(Self {
            name: CaseVariants::new(name)?,
            kind,
            position: 0,
        })
    }

    pub fn name(&self) -> &CaseVariants {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// 1-based ordinal in the owning list.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn is_custom(&self) -> bool {
        self.kind.is_custom()
    }

    /// Name as written in the schema (lower camel case).
    pub fn schema_name(&self) -> &str {
        self.name.lower_camel()
    }

    /// `{type} {name} = {position};`
    pub fn schema_declaration(&self) -> String {
        format!(
            "{} {} = {};",
            self.kind.schema_type(),
            self.schema_name(),
            self.position
        )
    }

    /// Import path the schema file needs for this field, if any.
    ///
    /// Custom kinds resolve to `{app}/{module}/{type_snake}.proto`.
    pub fn schema_import(&self, app_name: &str, module_name: &str) -> Option<String> {
        match &self.kind {
            FieldKind::Custom(type_name) => {
                let file = CaseVariants::new(type_name.as_str())
                    .map(|v| v.snake().to_string())
                    .unwrap_or_else(|_| type_name.to_ascii_lowercase());
                Some(format!("{app_name}/{module_name}/{file}.proto"))
            }
            other => other.schema_import().map(str::to_string),
        }
    }

    /// `name:type` as accepted by [`Field::parse`].
    pub fn token(&self) -> String {
        format!("{}:{}", self.name.original(), self.kind)
    }
}

/// An ordered list of fields with positions `1..=n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    /// Build a list, renumbering every field by its index.
    ///
    /// # Errors
    /// `DuplicateField` when two fields share a (snake-cased) name.
    pub fn new(fields: Vec<Field>, list: &'static str) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.snake().to_string()) {
                return Err(DomainError::DuplicateField {
                    name: field.name.original().to_string(),
                    list,
                });
            }
        }

        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(i, mut f)| {
                f.position = i as u32 + 1;
                f
            })
            .collect();

        Ok(Self { fields })
    }

    /// Parse whitespace-separated `name[:type]` tokens.
    pub fn parse<S: AsRef<str>>(tokens: &[S], list: &'static str) -> Result<Self, DomainError> {
        let fields = tokens
            .iter()
            .map(|t| Field::parse(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(fields, list)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position the synthetic pagination field takes in this list.
    pub fn pagination_position(&self) -> u32 {
        self.fields.len() as u32 + 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name.snake() == name)
    }

    /// Custom-typed fields only.
    pub fn custom(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_custom())
    }

    /// Every import the fields of this list need, in field order, without
    /// repeats.
    pub fn schema_imports(&self, app_name: &str, module_name: &str) -> Vec<String> {
        let mut imports: Vec<String> = Vec::new();
        for import in self
            .fields
            .iter()
            .filter_map(|f| f.schema_import(app_name, module_name))
        {
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
        imports
    }

    /// `name:type, name:type`, the form bound into render contexts.
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(Field::token)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
