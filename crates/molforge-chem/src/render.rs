//! Depiction rendering.
//!
//! `StructureRenderer` is the seam for a real 2-D depiction engine. The
//! built-in `SvgRenderer` emits a labelled placeholder so downstream image
//! grids always have a file to show.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use molforge_common::Result;

#[async_trait]
pub trait StructureRenderer: Send + Sync {
    /// Render a depiction of `smiles` to `out_path`, creating parent
    /// directories as needed.
    async fn render(&self, smiles: &str, out_path: &Path) -> Result<()>;
}

pub struct SvgRenderer {
    size: u32,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self { size: 300 }
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StructureRenderer for SvgRenderer {
    async fn render(&self, smiles: &str, out_path: &Path) -> Result<()> {
        if let Some(parent) = out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let label: String = smiles
            .chars()
            .map(|c| match c {
                '<' => '(',
                '>' => ')',
                '&' => '+',
                other => other,
            })
            .collect();
        let svg = format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{s}\" height=\"{s}\" ",
                "viewBox=\"0 0 {s} {s}\">\n",
                "  <rect width=\"{s}\" height=\"{s}\" fill=\"#ffffff\" stroke=\"#cccccc\"/>\n",
                "  <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" dominant-baseline=\"middle\" ",
                "font-family=\"monospace\" font-size=\"14\">{label}</text>\n",
                "</svg>\n"
            ),
            s = self.size,
            label = label,
        );
        tokio::fs::write(out_path, svg).await?;
        debug!("Rendered depiction for {} at {}", smiles, out_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images").join("mol.svg");
        SvgRenderer::new().render("CCO", &path).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("CCO"));
        assert!(content.starts_with("<svg"));
    }

    #[tokio::test]
    async fn test_render_escapes_markup_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mol.svg");
        SvgRenderer::new().render("C/C=C\\C", &path).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("<C"));
    }
}
