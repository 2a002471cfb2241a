//! Flat-file store for form documents and completed transcripts.
//!
//! Layout under the data directory:
//! - `forms/<form_id>.json` — one form document per file
//! - `responses/<form_id>_conversation.json` — exported transcripts
//!
//! Writes are whole-file overwrites; there are no partial updates.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::StoreError;
use crate::form::Form;
use crate::interview::model::{Turn, export_transcript};

pub struct FormStore {
    base_path: PathBuf,
}

impl FormStore {
    /// Create a store rooted at `base_path` (the data directory).
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn forms_dir(&self) -> PathBuf {
        self.base_path.join("forms")
    }

    fn responses_dir(&self) -> PathBuf {
        self.base_path.join("responses")
    }

    fn form_path(&self, form_id: &str) -> PathBuf {
        self.forms_dir().join(format!("{form_id}.json"))
    }

    fn transcript_path(&self, form_id: &str) -> PathBuf {
        self.responses_dir()
            .join(format!("{form_id}_conversation.json"))
    }

    /// Ensure the forms and responses directories exist.
    pub async fn ensure_dirs(&self) -> Result<(), StoreError> {
        fs::create_dir_all(self.forms_dir()).await?;
        fs::create_dir_all(self.responses_dir()).await?;
        Ok(())
    }

    /// Persist a form document. Returns the written path.
    pub async fn save_form(&self, form: &Form) -> Result<PathBuf, StoreError> {
        let path = self.form_path(&form.form_id);
        let json = serde_json::to_string_pretty(form)?;
        write_text(&path, &json).await?;
        Ok(path)
    }

    /// Load a form document by id.
    pub async fn load_form(&self, form_id: &str) -> Result<Form, StoreError> {
        let path = self.form_path(form_id);
        if !path.exists() {
            return Err(StoreError::FormNotFound(form_id.to_string()));
        }
        let json = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Whether a form document exists on disk.
    pub async fn form_exists(&self, form_id: &str) -> bool {
        self.form_path(form_id).exists()
    }

    /// Persist a completed transcript alongside the form. Returns the
    /// written path.
    pub async fn save_transcript(
        &self,
        form_id: &str,
        turns: &[Turn],
    ) -> Result<PathBuf, StoreError> {
        let path = self.transcript_path(form_id);
        let json = export_transcript(turns)?;
        write_text(&path, &json).await?;
        Ok(path)
    }
}

async fn write_text(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn test_store() -> (FormStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FormStore::new(dir.path().to_path_buf());
        store.ensure_dirs().await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn ensure_dirs_creates_layout() {
        let (_store, dir) = test_store().await;
        assert!(dir.path().join("forms").is_dir());
        assert!(dir.path().join("responses").is_dir());
    }

    #[tokio::test]
    async fn form_roundtrip() {
        let (store, _dir) = test_store().await;
        let form = Form::new("Evaluate satisfaction", "q1\nq2").unwrap();

        let path = store.save_form(&form).await.unwrap();
        assert!(path.ends_with(format!("forms/{}.json", form.form_id)));

        let loaded = store.load_form(&form.form_id).await.unwrap();
        assert_eq!(loaded.form_id, form.form_id);
        assert_eq!(loaded.goal, form.goal);
        assert_eq!(loaded.questions, form.questions);
    }

    #[tokio::test]
    async fn load_missing_form_is_not_found() {
        let (store, _dir) = test_store().await;
        let result = store.load_form("form_19700101_000000").await;
        assert!(matches!(result, Err(StoreError::FormNotFound(_))));
        assert!(!store.form_exists("form_19700101_000000").await);
    }

    #[tokio::test]
    async fn save_form_overwrites_whole_file() {
        let (store, _dir) = test_store().await;
        let mut form = Form::new("goal", "q1\nq2").unwrap();
        store.save_form(&form).await.unwrap();

        form.questions = vec!["replacement".to_string()];
        store.save_form(&form).await.unwrap();

        let loaded = store.load_form(&form.form_id).await.unwrap();
        assert_eq!(loaded.questions, vec!["replacement"]);
    }

    #[tokio::test]
    async fn transcript_saved_as_role_content_array() {
        let (store, _dir) = test_store().await;
        let turns = vec![Turn::assistant("Q?"), Turn::user("A.")];

        let path = store.save_transcript("form_x", &turns).await.unwrap();
        assert!(path.ends_with("responses/form_x_conversation.json"));

        let json = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<Turn> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turns);
    }
}
