pub mod validate;

use crate::error::{ReelPassError, Result};
use crate::scoring::policy::ScoringPolicy;
use crate::types::evidence::EvidenceBundle;
use crate::types::scoring::Category;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// A record excluded from scoring because it failed decoding or validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedRecord {
    pub category: Category,
    pub index: usize,
    pub reason: String,
}

impl DroppedRecord {
    pub fn to_error(&self) -> ReelPassError {
        ReelPassError::MalformedRecord {
            category: self.category,
            index: self.index,
            reason: self.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub bundle: EvidenceBundle,
    pub dropped: Vec<DroppedRecord>,
}

/// Reads a raw evidence bundle from a JSON file.
pub fn load_bundle(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(ReelPassError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Turns raw upstream evidence into a typed bundle. Malformed records are
/// dropped and reported; only a broken bundle shape is an error.
pub fn normalize(raw: &Value, policy: &ScoringPolicy) -> Result<Normalized> {
    let object = raw
        .as_object()
        .ok_or_else(|| ReelPassError::BundleNotObject(json_kind(raw).to_string()))?;

    let mut dropped = Vec::new();

    let projects = container(object, Category::Project, policy)?;
    let persona = container(object, Category::Persona, policy)?;
    let credentials = container(object, Category::Foundational, policy)?;
    let learning = container(object, Category::Learning, policy)?;
    let experience = container(object, Category::Experience, policy)?;

    let bundle = EvidenceBundle {
        projects: collect(Category::Project, projects, validate::project, &mut dropped)?,
        persona: collect(Category::Persona, persona, validate::persona, &mut dropped)?,
        credentials: collect(
            Category::Foundational,
            credentials,
            validate::credential,
            &mut dropped,
        )?,
        learning: collect(Category::Learning, learning, validate::learning, &mut dropped)?,
        experience: collect(
            Category::Experience,
            experience,
            validate::experience,
            &mut dropped,
        )?,
    };

    debug!(
        projects = bundle.projects.len(),
        persona = bundle.persona.len(),
        credentials = bundle.credentials.len(),
        learning = bundle.learning.len(),
        experience = bundle.experience.len(),
        dropped = dropped.len(),
        "evidence normalized"
    );

    Ok(Normalized { bundle, dropped })
}

fn container<'a>(
    object: &'a Map<String, Value>,
    category: Category,
    policy: &ScoringPolicy,
) -> Result<&'a [Value]> {
    let key = category.bundle_key();
    match object.get(key) {
        None if policy.allow_missing_categories => Ok(&[][..]),
        None => Err(shape(category, format!("missing \"{key}\" container"))),
        Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(shape(
            category,
            format!("\"{key}\" must be an array, found {}", json_kind(other)),
        )),
    }
}

fn collect<T, F>(
    category: Category,
    items: &[Value],
    check: F,
    dropped: &mut Vec<DroppedRecord>,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Fn(&T) -> validate::Check,
{
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let fields = item.as_object().ok_or_else(|| {
            shape(
                category,
                format!("record {index} must be an object, found {}", json_kind(item)),
            )
        })?;
        if let Some(points) = fields.get("points") {
            if !points.is_number() && !points.is_null() {
                return Err(shape(
                    category,
                    format!(
                        "record {index} has non-numeric points ({})",
                        json_kind(points)
                    ),
                ));
            }
        }

        let outcome = serde_json::from_value::<T>(item.clone())
            .map_err(|err| err.to_string())
            .and_then(|record| check(&record).map(|()| record));
        match outcome {
            Ok(record) => records.push(record),
            Err(reason) => {
                let record = DroppedRecord {
                    category,
                    index,
                    reason,
                };
                warn!(error = %record.to_error(), "dropping evidence record");
                dropped.push(record);
            }
        }
    }
    Ok(records)
}

fn shape(category: Category, reason: String) -> ReelPassError {
    ReelPassError::InvalidBundleShape { category, reason }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
