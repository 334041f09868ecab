//! Import command - converts compiled page bundles into JSON bundles

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use nanceio_generator::import_dir;

/// Run the import command.
pub fn run(source: &Path, output: &Path) -> Result<()> {
    tracing::info!(?source, ?output, "Importing compiled bundles");

    if !source.is_dir() {
        bail!("Source directory {} does not exist", source.display());
    }

    let count = import_dir(source, output)
        .wrap_err_with(|| format!("Failed to import bundles from {}", source.display()))?;

    println!();
    println!("  Imported {count} bundle(s) into {}", output.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_import_writes_bundles() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("compiled");
        fs::create_dir(&source).unwrap();
        fs::write(
            source.join("path---about-1f2e.js"),
            r#"webpackJsonp([2],{3:function(n,s){n.exports={data:{markdownRemark:{html:"<p>About</p>",frontmatter:{title:"About",date:"2017-01-01"}}},pathContext:{slug:"/about/",previous:!1,next:!1}}}});"#,
        )
        .unwrap();

        let output = dir.path().join("bundles");
        run(&source, &output).unwrap();
        assert!(output.join("about.json").exists());
    }

    #[test]
    fn test_import_missing_source() {
        let dir = TempDir::new().unwrap();
        assert!(run(&dir.path().join("nope"), &dir.path().join("bundles")).is_err());
    }
}
