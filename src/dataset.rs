use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("class id {0:?} is not of the form <grade>-<room>")]
    BadClassId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassKey {
    pub grade: i64,
    pub room: i64,
}

/// Parses `"<grade>-<room>"` into its numeric sort key. Anything after the
/// second segment is ignored.
pub fn parse_class_key(class_id: &str) -> Result<ClassKey, DatasetError> {
    let mut parts = class_id.split('-');
    let grade = parts.next().and_then(|s| s.trim().parse::<i64>().ok());
    let room = parts.next().and_then(|s| s.trim().parse::<i64>().ok());
    match (grade, room) {
        (Some(grade), Some(room)) => Ok(ClassKey { grade, room }),
        _ => Err(DatasetError::BadClassId(class_id.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RecordBody {
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default)]
    pub length: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentRecord {
    pub number: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub student_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remark: String,
    #[serde(default)]
    pub record: RecordBody,
}

// Source files are hand-edited: ids show up as bare integers and blank
// remarks as null.
fn lenient_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Plaintext password per class. A missing or empty entry locks the class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordTable {
    entries: HashMap<String, String>,
}

impl PasswordTable {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, class_id: &str) -> &str {
        self.entries.get(class_id).map(String::as_str).unwrap_or("")
    }

    pub fn is_locked(&self, class_id: &str) -> bool {
        self.get(class_id).is_empty()
    }

    pub fn contains(&self, class_id: &str) -> bool {
        self.entries.contains_key(class_id)
    }

    fn fill_missing<'a>(&mut self, classes: impl IntoIterator<Item = &'a String>) {
        for c in classes {
            self.entries.entry(c.clone()).or_default();
        }
    }
}

/// Rosters and passwords, loaded once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    data_path: PathBuf,
    rosters: HashMap<String, Vec<StudentRecord>>,
    classes: Vec<String>,
    passwords: PasswordTable,
    sha256: String,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn from_parts(
        rosters: HashMap<String, Vec<StudentRecord>>,
        passwords: HashMap<String, String>,
    ) -> Result<Self, DatasetError> {
        let classes = sorted_classes(rosters.keys())?;
        let mut passwords = PasswordTable::new(passwords);
        passwords.fill_missing(&classes);
        Ok(Self {
            data_path: PathBuf::new(),
            rosters,
            classes,
            passwords,
            sha256: String::new(),
            loaded_at: Utc::now(),
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains_class(&self, class_id: &str) -> bool {
        self.rosters.contains_key(class_id)
    }

    pub fn roster(&self, class_id: &str) -> Option<&[StudentRecord]> {
        self.rosters.get(class_id).map(Vec::as_slice)
    }

    pub fn passwords(&self) -> &PasswordTable {
        &self.passwords
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

pub fn sorted_classes<'a>(
    ids: impl IntoIterator<Item = &'a String>,
) -> Result<Vec<String>, DatasetError> {
    let mut keyed = ids
        .into_iter()
        .map(|id| parse_class_key(id).map(|k| (k, id.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    // "2-6" and "2-06" share a key; the id itself keeps the order total.
    keyed.sort();
    Ok(keyed.into_iter().map(|(_, id)| id).collect())
}

pub fn load_dataset(data_path: &Path, passwords_path: &Path) -> anyhow::Result<Dataset> {
    let bytes = std::fs::read(data_path)
        .with_context(|| format!("failed to read dataset {}", data_path.to_string_lossy()))?;
    let rosters: HashMap<String, Vec<StudentRecord>> = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse dataset {}", data_path.to_string_lossy()))?;
    let passwords = load_passwords(passwords_path)?;

    let mut dataset = Dataset::from_parts(rosters, passwords)?;
    dataset.data_path = data_path.to_path_buf();
    dataset.sha256 = hex_sha256(&bytes);
    Ok(dataset)
}

/// A missing password file is not an error: every class stays locked.
pub fn load_passwords(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    if !path.is_file() {
        tracing::warn!(
            path = %path.to_string_lossy(),
            "password file not found; all classes are locked"
        );
        return Ok(HashMap::new());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read password file {}", path.to_string_lossy()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse password file {}", path.to_string_lossy()))
}

fn hex_sha256(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
