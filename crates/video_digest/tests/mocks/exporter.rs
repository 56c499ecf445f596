use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use digest_export::{Content, ExportError, ExportFormat, Exporter};

#[derive(Clone)]
pub struct MockExporter {
    pub exports: Arc<Mutex<Vec<(Content, PathBuf, ExportFormat)>>>,
    pub fail_with: Option<String>,
}

impl Default for MockExporter {
    fn default() -> Self {
        Self {
            exports: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockExporter {
    pub fn failing(msg: &str) -> Self {
        Self {
            exports: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Exporter for MockExporter {
    async fn export(
        &self,
        content: &Content,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        if let Some(ref msg) = self.fail_with {
            return Err(ExportError::Io(std::io::Error::other(msg.clone())));
        }
        self.exports
            .lock()
            .unwrap()
            .push((content.clone(), path.to_path_buf(), format));
        Ok(())
    }
}
