//! Enrichment targets and the resolver steps that fill them.
//!
//! A pass is an ordered list of [`Step`]s. A record is selected when any step
//! needs work on it; each step then runs only if its own target still needs
//! work, so a combined pass never refills a field that is already present.
use crate::record::{Field, FieldStatus, Record, DEFINITION_ALIASES};
use crate::resolver::Resolver;

/// Field group a step writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// English definition across `definition`, `definitionEn`, and `meaning`.
    Definition,
    /// Chinese `translation`.
    Translation,
    /// `image_url` when absent; generated placeholders are left alone.
    GeneratedImage,
    /// `image_url` when absent or still a generated placeholder.
    SearchedImage,
}

impl Target {
    pub fn label(&self) -> &'static str {
        match self {
            Target::Definition => "definition",
            Target::Translation => "translation",
            Target::GeneratedImage => "generated_image",
            Target::SearchedImage => "searched_image",
        }
    }

    /// Decide whether a record still needs this target filled.
    pub fn needs_work(&self, record: &Record) -> bool {
        match self {
            Target::Definition => {
                record.status(Field::Definition).needs_fill()
                    || record.status(Field::DefinitionEn) == FieldStatus::Placeholder
            }
            Target::Translation => record.status(Field::Translation).needs_fill(),
            Target::GeneratedImage => record.status(Field::ImageUrl) == FieldStatus::Missing,
            Target::SearchedImage => record.status(Field::ImageUrl).needs_fill(),
        }
    }

    /// Write a resolved value into every field this target owns.
    pub fn apply(&self, record: &mut Record, value: &str) {
        match self {
            Target::Definition => {
                for field in DEFINITION_ALIASES {
                    record.set_str(field, value);
                }
            }
            Target::Translation => {
                record.set_str(Field::Translation, value);
            }
            Target::GeneratedImage | Target::SearchedImage => {
                record.set_str(Field::ImageUrl, value);
            }
        }
    }
}

/// One target paired with the resolver that fills it.
pub struct Step {
    pub target: Target,
    pub resolver: Box<dyn Resolver>,
}

impl Step {
    pub fn new(target: Target, resolver: impl Resolver + 'static) -> Self {
        Self {
            target,
            resolver: Box::new(resolver),
        }
    }
}

/// True when at least one step has work to do on the record.
pub fn needs_any(steps: &[Step], record: &Record) -> bool {
    steps.iter().any(|step| step.target.needs_work(record))
}
