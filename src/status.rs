//! Read-only summary of how much work each pass would find.
use crate::pass::Target;
use crate::record::{Field, FieldStatus, Record};
use crate::reconcile::aliases_out_of_sync;
use serde::Serialize;

/// Per-gap record counts for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStatus {
    pub total: usize,
    pub definitions: usize,
    pub translations: usize,
    pub images_missing: usize,
    pub images_generated: usize,
    pub ids_missing: usize,
    pub aliases_out_of_sync: usize,
}

/// Count records needing each pass.
pub fn summarize(records: &[Record]) -> DatasetStatus {
    let mut status = DatasetStatus {
        total: records.len(),
        ..DatasetStatus::default()
    };
    for record in records {
        status.definitions += usize::from(Target::Definition.needs_work(record));
        status.translations += usize::from(Target::Translation.needs_work(record));
        match record.status(Field::ImageUrl) {
            FieldStatus::Missing => status.images_missing += 1,
            FieldStatus::Placeholder => status.images_generated += 1,
            FieldStatus::Present | FieldStatus::Foreign => {}
        }
        status.ids_missing += usize::from(record.status(Field::Id).needs_fill());
        status.aliases_out_of_sync += usize::from(aliases_out_of_sync(record));
    }
    status
}

/// Render the summary as aligned text lines.
pub fn render_text(status: &DatasetStatus) -> String {
    let rows = [
        ("records", status.total),
        ("definitions to fill", status.definitions),
        ("translations to fill", status.translations),
        ("images missing", status.images_missing),
        ("images generated (searchable)", status.images_generated),
        ("ids missing", status.ids_missing),
        ("aliases out of sync", status.aliases_out_of_sync),
    ];
    let mut out = String::new();
    for (label, count) in rows {
        out.push_str(&format!("{label:<30} {count}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarize_counts_each_gap() {
        let records: Vec<Record> = [
            json!({ "word": "cat", "id": "ket_cat", "definition": "Official KET word",
                    "translation": "待补充", "image_url": null }),
            json!({ "word": "dog", "definition": "a pet", "meaning": "a loyal pet",
                    "translation": "n. 狗",
                    "image_url": "https://image.pollinations.ai/prompt/dog" }),
            json!({ "word": "sun", "id": "ket_sun", "definition": "a star",
                    "definitionEn": "a star", "meaning": "a star", "translation": "n. 太阳",
                    "image_url": "https://example.com/sun.png" }),
        ]
        .into_iter()
        .map(|value| Record::from_value(value).expect("valid record"))
        .collect();

        let status = summarize(&records);

        assert_eq!(
            status,
            DatasetStatus {
                total: 3,
                definitions: 1,
                translations: 1,
                images_missing: 1,
                images_generated: 1,
                ids_missing: 1,
                aliases_out_of_sync: 1,
            }
        );
        assert!(render_text(&status).contains("ids missing"));
    }
}
