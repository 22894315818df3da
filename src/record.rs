//! Vocabulary record model and placeholder classification.
//!
//! A record is kept as the raw JSON object it was loaded from so fields this
//! tool does not know about survive a load/save cycle in their original order.
//! All sentinel detection lives in [`Record::status`]; passes never compare
//! field values against placeholder strings themselves.
use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Definition placeholder written by the initial word-list import.
pub const PLACEHOLDER_DEFINITION: &str = "Official KET word";
/// Substring marking a translation that still needs filling.
pub const TRANSLATION_PENDING_MARKER: &str = "待补充";
/// Host of generated stand-in images; the search pass replaces these.
pub const GENERATED_IMAGE_HOST: &str = "image.pollinations.ai";

/// Known record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Word,
    Id,
    Definition,
    DefinitionEn,
    Meaning,
    Translation,
    ImageUrl,
}

/// Fields that hold the same English definition and must agree.
pub const DEFINITION_ALIASES: [Field; 3] = [Field::Definition, Field::DefinitionEn, Field::Meaning];

impl Field {
    /// Return the JSON key used in the dataset.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Word => "word",
            Field::Id => "id",
            Field::Definition => "definition",
            Field::DefinitionEn => "definitionEn",
            Field::Meaning => "meaning",
            Field::Translation => "translation",
            Field::ImageUrl => "image_url",
        }
    }

    fn is_placeholder(&self, value: &str) -> bool {
        match self {
            Field::Definition | Field::DefinitionEn | Field::Meaning => {
                value == PLACEHOLDER_DEFINITION
            }
            Field::Translation => value.contains(TRANSLATION_PENDING_MARKER),
            Field::ImageUrl => value.contains(GENERATED_IMAGE_HOST),
            Field::Word | Field::Id => false,
        }
    }
}

/// Classification of a single field on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Present,
    Missing,
    Placeholder,
    /// Holds a non-string value (e.g. a numeric id); passes leave it alone.
    Foreign,
}

impl FieldStatus {
    /// True when the field should be (re)filled by an enrichment pass.
    pub fn needs_fill(&self) -> bool {
        matches!(self, FieldStatus::Missing | FieldStatus::Placeholder)
    }
}

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Wrap a JSON value, requiring an object with a string `word`.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(anyhow!("record is not a JSON object"));
        };
        match fields.get(Field::Word.key()) {
            Some(Value::String(_)) => Ok(Self { fields }),
            Some(_) => Err(anyhow!("record `word` is not a string")),
            None => Err(anyhow!("record has no `word`")),
        }
    }

    /// The identifying word, exactly as stored.
    pub fn word(&self) -> &str {
        self.fields
            .get(Field::Word.key())
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Return a string field, or `None` when absent or not a string.
    pub fn get_str(&self, field: Field) -> Option<&str> {
        self.fields.get(field.key()).and_then(Value::as_str)
    }

    /// Write a string field and report whether the stored value changed.
    ///
    /// Existing keys keep their position; new keys are appended.
    pub fn set_str(&mut self, field: Field, value: &str) -> bool {
        debug_assert_ne!(field, Field::Word, "record identity is immutable");
        if self.get_str(field) == Some(value) {
            return false;
        }
        self.fields
            .insert(field.key().to_string(), Value::String(value.to_string()));
        true
    }

    /// Classify a field as present, missing, or holding a placeholder.
    ///
    /// Only an absent key, `null`, or a blank string counts as missing.
    pub fn status(&self, field: Field) -> FieldStatus {
        let value = match self.fields.get(field.key()) {
            None | Some(Value::Null) => return FieldStatus::Missing,
            Some(Value::String(value)) => value,
            Some(_) => return FieldStatus::Foreign,
        };
        if value.trim().is_empty() {
            FieldStatus::Missing
        } else if field.is_placeholder(value) {
            FieldStatus::Placeholder
        } else {
            FieldStatus::Present
        }
    }

    /// Borrow the value of a field only when it is [`FieldStatus::Present`].
    pub fn present(&self, field: Field) -> Option<&str> {
        match self.status(field) {
            FieldStatus::Present => self.get_str(field),
            _ => None,
        }
    }

    /// Clone the underlying JSON object.
    #[cfg(test)]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
