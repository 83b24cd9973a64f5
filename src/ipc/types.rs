use std::sync::Arc;

use serde::Deserialize;

use crate::dataset::Dataset;
use crate::session::SessionRegistry;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub sessions: SessionRegistry,
    pub title: String,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, title: impl Into<String>) -> Self {
        Self {
            dataset,
            sessions: SessionRegistry::new(),
            title: title.into(),
        }
    }
}
