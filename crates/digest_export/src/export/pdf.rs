use std::{io::ErrorKind, path::Path, process::Stdio};

use tokio::{io::AsyncWriteExt, process::Command};

use super::ExportError;

const RENDERER_BIN: &str = "weasyprint";
const INSTALL_HINT: &str = "pip install weasyprint";

/// Renders an HTML document to PDF through the external layout engine,
/// streaming the HTML over stdin. A missing binary surfaces as
/// [`ExportError::PdfRendererMissing`] with an install hint.
pub(crate) async fn render_pdf(html: &str, path: &Path) -> Result<(), ExportError> {
    let mut child = Command::new(RENDERER_BIN)
        .arg("-")
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExportError::PdfRendererMissing {
                binary: RENDERER_BIN,
                install_hint: INSTALL_HINT,
            },
            _ => ExportError::Io(e),
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ExportError::PdfRender("failed to open renderer stdin".into()))?;
    stdin.write_all(html.as_bytes()).await?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "PDF renderer did not exit cleanly"))?;

    if !output.status.success() {
        return Err(ExportError::PdfRender(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(())
}
