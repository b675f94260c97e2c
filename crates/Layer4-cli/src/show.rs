//! `sashimono show`

use anyhow::Context;
use sashimono_core::{manifest_path, Manifest};
use serde::Serialize;
use std::path::Path;

/// JSON view of a manifest
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestView {
    artifact: Option<String>,
    packaging: Option<String>,
    modules: Vec<String>,
    requires: Vec<String>,
    filtered_resources: bool,
    sources: Vec<String>,
}

impl From<&Manifest> for ManifestView {
    fn from(manifest: &Manifest) -> Self {
        Self {
            artifact: manifest.artifact().map(|c| c.to_string()),
            packaging: manifest.packaging().map(str::to_string),
            modules: manifest.modules().map(str::to_string).collect(),
            requires: manifest.requires().map(|c| c.to_string()).collect(),
            filtered_resources: manifest.filtered_resources(),
            sources: manifest.sources().map(str::to_string).collect(),
        }
    }
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let path = manifest_path(root);
    let manifest = Manifest::load(&path)
        .with_context(|| format!("reading {} (run `sashimono generate` first)", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ManifestView::from(&manifest))?);
    } else {
        print!("{}", format_manifest(&manifest));
    }
    Ok(())
}

fn format_manifest(manifest: &Manifest) -> String {
    let view = ManifestView::from(manifest);
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        view.artifact.as_deref().unwrap_or("<no artifact>"),
        view.packaging.as_deref().unwrap_or("<no packaging>")
    ));
    if !view.modules.is_empty() {
        out.push_str(&format!("  modules:  {}\n", view.modules.join(", ")));
    }
    out.push_str(&format!("  requires: {}\n", view.requires.len()));
    for require in &view.requires {
        out.push_str(&format!("    {}\n", require));
    }
    out.push_str(&format!("  filtered resources: {}\n", view.filtered_resources));
    for source in &view.sources {
        out.push_str(&format!("  source:   {}\n", source));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_manifest() {
        let manifest = Manifest::parse(
            "artifact g:app:1\npackaging jar\nrequire g:a:1\nfiltered_resources false\nsource src\n",
        )
        .unwrap();
        assert_eq!(
            format_manifest(&manifest),
            "g:app:1 (jar)\n  requires: 1\n    g:a:1\n  filtered resources: false\n  source:   src\n"
        );
    }

    #[test]
    fn test_missing_manifest_mentions_generate() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = run(dir.path(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("sashimono generate"));
    }
}
