use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// One extracted condition page. Field order here is the key order on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    #[serde(rename = "titulo")]
    pub title: String,
    pub overview: String,
    #[serde(rename = "sintomas")]
    pub symptoms: String,
    pub risk_factors: String,
}

/// Shape of the JSON array written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `[[{...}], [{...}]]`, each record wrapped in its own array. Same shape
    /// and key order as the legacy file, but non-ASCII text is written as
    /// UTF-8 rather than `\uXXXX` escapes, so the bytes can differ.
    #[default]
    Nested,
    /// `[{...}, {...}]`
    Flat,
}

impl std::str::FromStr for OutputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nested" => Ok(OutputLayout::Nested),
            "flat" => Ok(OutputLayout::Flat),
            other => Err(format!("unknown layout '{}' (expected nested or flat)", other)),
        }
    }
}

/// Records gathered during one run, in crawl order.
#[derive(Debug, Default)]
pub struct ResultCollection {
    records: Vec<ConditionRecord>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ConditionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    /// Serialize the whole collection with 4-space indentation.
    pub fn write_json<W: Write>(&self, writer: W, layout: OutputLayout) -> Result<(), StoreError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        match layout {
            OutputLayout::Nested => {
                let wrapped: Vec<[&ConditionRecord; 1]> =
                    self.records.iter().map(|r| [r]).collect();
                wrapped.serialize(&mut ser)?;
            }
            OutputLayout::Flat => self.records().serialize(&mut ser)?,
        }
        Ok(())
    }

    /// Overwrite `path` with the full collection.
    pub fn save(&self, path: &Path, layout: OutputLayout) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        self.write_json(&mut writer, layout)?;
        writer.flush().map_err(io_err)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json(results: &ResultCollection, layout: OutputLayout) -> String {
        let mut buf = Vec::new();
        results.write_json(&mut buf, layout).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn flu() -> ConditionRecord {
        ConditionRecord {
            title: "Flu".into(),
            overview: "Common illness.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn nested_layout_wraps_each_record() {
        let mut results = ResultCollection::new();
        results.push(flu());
        results.push(ConditionRecord {
            title: "Acne".into(),
            ..Default::default()
        });

        let value: serde_json::Value =
            serde_json::from_str(&to_json(&results, OutputLayout::Nested)).unwrap();
        let outer = value.as_array().unwrap();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].as_array().unwrap().len(), 1);
        assert_eq!(outer[0][0]["titulo"], "Flu");
        assert_eq!(outer[0][0]["overview"], "Common illness.");
        assert_eq!(outer[0][0]["sintomas"], "");
        assert_eq!(outer[1][0]["titulo"], "Acne");
    }

    #[test]
    fn flat_layout_is_plain_array() {
        let mut results = ResultCollection::new();
        results.push(flu());
        let parsed: Vec<ConditionRecord> =
            serde_json::from_str(&to_json(&results, OutputLayout::Flat)).unwrap();
        assert_eq!(parsed, vec![flu()]);
    }

    #[test]
    fn keys_keep_field_order_and_indent() {
        let mut results = ResultCollection::new();
        results.push(flu());
        let json = to_json(&results, OutputLayout::Flat);
        let expected = "[\n    {\n        \"titulo\": \"Flu\",\n        \"overview\": \"Common illness.\",\n        \"sintomas\": \"\",\n        \"risk_factors\": \"\"\n    }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn empty_collection_writes_empty_array() {
        let results = ResultCollection::new();
        assert!(results.is_empty());
        assert_eq!(to_json(&results, OutputLayout::Nested), "[]");
    }

    #[test]
    fn save_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("secciones.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale content from an earlier run").unwrap();

        let mut results = ResultCollection::new();
        results.push(flu());
        results.save(&path, OutputLayout::Nested).unwrap();

        let on_disk: Vec<Vec<ConditionRecord>> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec![vec![flu()]]);
    }

    #[test]
    fn save_writes_non_ascii_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secciones.json");
        let mut results = ResultCollection::new();
        results.push(ConditionRecord {
            title: "Síndrome de Ménière".into(),
            ..Default::default()
        });
        results.save(&path, OutputLayout::Flat).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"titulo\": \"Síndrome de Ménière\""));
        assert_eq!(raw, to_json(&results, OutputLayout::Flat));
    }

    #[test]
    fn layout_parses_case_insensitively() {
        assert_eq!("Flat".parse::<OutputLayout>().unwrap(), OutputLayout::Flat);
        assert_eq!("nested".parse::<OutputLayout>().unwrap(), OutputLayout::Nested);
        assert!("tree".parse::<OutputLayout>().is_err());
    }
}
