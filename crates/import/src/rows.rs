use crate::error::ImportError;
use cardpress_model::{CardDeck, CardRecord, CardTemplate, FieldDefinition, FieldKind};

/// File extensions that mark a value or header as an image reference.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];
/// Header words that mark a column as holding images.
pub const IMAGE_KEYWORDS: [&str; 5] = ["photo", "image", "logo", "picture", "pic"];
/// Data rows sampled when looking for image file names.
pub const SAMPLE_ROWS: usize = 8;

const FIELD_X: f32 = 10.0;
const FIELD_Y: f32 = 10.0;
const FIELD_STEP: f32 = 25.0;
const TEXT_SIZE: (f32, f32) = (150.0, 25.0);
const IMAGE_SIZE: (f32, f32) = (80.0, 80.0);

fn has_image_extension(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && IMAGE_EXTENSIONS.contains(&ext))
}

fn is_image_column(header: &str, column: usize, data: &[Vec<String>]) -> bool {
    if has_image_extension(header) {
        return true;
    }
    let lower = header.to_lowercase();
    if IMAGE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return true;
    }
    data.iter()
        .take(SAMPLE_ROWS)
        .filter_map(|row| row.get(column))
        .any(|value| has_image_extension(value))
}

/// Builds a deck from rows of cell text. The first row is the header.
pub fn import_rows(rows: Vec<Vec<String>>) -> Result<CardDeck, ImportError> {
    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(ImportError::EmptyHeader)?;
    if header.iter().all(|cell| cell.trim().is_empty()) {
        return Err(ImportError::EmptyHeader);
    }
    let data: Vec<Vec<String>> = rows.collect();

    let mut template = CardTemplate::new();
    let mut ids = Vec::with_capacity(header.len());
    for (column, cell) in header.iter().enumerate() {
        let name = match cell.trim() {
            "" => format!("Column{}", column + 1),
            trimmed => trimmed.to_string(),
        };
        let id = template.unique_field_name(&name);
        let (kind, (width, height)) = if is_image_column(&name, column, &data) {
            (FieldKind::Image, IMAGE_SIZE)
        } else {
            (FieldKind::Text, TEXT_SIZE)
        };
        let field = FieldDefinition::new(id.clone(), kind)
            .at(FIELD_X, FIELD_Y + FIELD_STEP * column as f32)
            .sized(width, height);
        if let Err(e) = template.push_field(field) {
            log::warn!("Skipping column {} ('{}'): {}", column + 1, name, e);
            continue;
        }
        ids.push((column, id));
    }

    let records: Vec<CardRecord> = data
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            ids.iter()
                .filter_map(|(column, id)| {
                    row.get(*column)
                        .filter(|value| !value.is_empty())
                        .map(|value| (id.clone(), value.clone()))
                })
                .collect()
        })
        .collect();

    log::debug!(
        "Import produced {} fields ({} image) and {} cards",
        template.len(),
        template.fields().iter().filter(|f| f.is_image()).count(),
        records.len()
    );
    Ok(CardDeck::with_records(template, records))
}
