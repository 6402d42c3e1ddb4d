use crate::types::TitleRequest;
use std::fs;
use std::path::Path;
use titlesmith_common::{Result, TitlesmithError};

/// JSON-file-backed store for title suggestion requests
pub struct RequestStore {
    records: Vec<TitleRequest>,
    file_path: std::path::PathBuf,
}

impl RequestStore {
    pub fn load(path: &Path) -> Result<Self> {
        let records: Vec<TitleRequest> = if path.exists() {
            let data = fs::read_to_string(path)?;
            serde_json::from_str(&data).unwrap_or_else(|_| Vec::new())
        } else {
            Vec::new()
        };

        Ok(Self {
            records,
            file_path: path.to_path_buf(),
        })
    }

    /// Persist a new request record before any provider work happens
    ///
    /// A save failure here is fatal for the request: without a record the
    /// pipeline has nothing to audit against.
    pub fn create(&mut self, content: &str) -> Result<TitleRequest> {
        let record = TitleRequest::new(content.to_string());
        self.records.push(record.clone());
        self.save()?;
        Ok(record)
    }

    /// Store the merged title list on an existing record
    pub fn update_titles(&mut self, id: &str, titles: &[String]) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| TitlesmithError::not_found(format!("Request {}", id)))?;
        record.suggested_titles = titles.to_vec();
        self.save()
    }

    pub fn all(&self) -> Vec<TitleRequest> {
        self.records.clone()
    }

    pub fn get(&self, id: &str) -> Option<&TitleRequest> {
        self.records.iter().find(|r| r.id == id)
    }

    fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.file_path, data)
            .map_err(|e| TitlesmithError::store(format!("Failed to save request store: {}", e)))
    }
}
