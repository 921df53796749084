//! Resources.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{ModelId, RecordId};

/// The target of an action: a model, optionally narrowed to one record.
///
/// A resource without a model ID stands for "a model that does not exist
/// yet" and is only meaningful for model creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// The targeted model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<ModelId>,

    /// The targeted record within the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
}

impl Resource {
    /// A resource for creating a model with a generated ID.
    pub fn new_model() -> Self {
        Self::default()
    }

    /// A whole model.
    pub fn model(model_id: ModelId) -> Self {
        Self {
            model_id: Some(model_id),
            record_id: None,
        }
    }

    /// One record of a model.
    pub fn record(model_id: ModelId, record_id: RecordId) -> Self {
        Self {
            model_id: Some(model_id),
            record_id: Some(record_id),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.model_id, &self.record_id) {
            (None, _) => write!(f, "models/"),
            (Some(model), None) => write!(f, "models/{model}"),
            (Some(model), Some(record)) => write!(f, "models/{model}/records/{record}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_display() {
        let model = ModelId::from_string("todo").unwrap();
        let record = RecordId::from_string("r1").unwrap();

        assert_eq!(Resource::new_model().to_string(), "models/");
        assert_eq!(Resource::model(model.clone()).to_string(), "models/todo");
        assert_eq!(
            Resource::record(model, record).to_string(),
            "models/todo/records/r1"
        );
    }

    #[test]
    fn test_resource_serde_skips_missing_parts() {
        let resource = Resource::model(ModelId::from_string("todo").unwrap());
        let json = serde_json::to_string(&resource).unwrap();
        assert_eq!(json, r#"{"model_id":"todo"}"#);
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resource);
    }
}
