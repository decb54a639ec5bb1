use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;
use std::str::FromStr;

/// Supported renderings of grammars and automata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// The line-oriented input layout, readable again by the reader
    Source,
    /// JSON format
    Json,
    /// DOT format for visualization (automata only)
    Dot,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "source" => Ok(Self::Source),
            "json" => Ok(Self::Json),
            "dot" => Ok(Self::Dot),
            _ => bail!("Unsupported output format: {}", s),
        }
    }
}

impl OutputFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Source => "src",
            Self::Json => "json",
            Self::Dot => "dot",
        }
    }
}

/// Get the output format from a file extension
pub fn format_from_extension(path: &Path) -> Result<OutputFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("txt") | Some("text") => Ok(OutputFormat::Text),
        Some("src") => Ok(OutputFormat::Source),
        Some("json") => Ok(OutputFormat::Json),
        Some("dot") | Some("gv") => Ok(OutputFormat::Dot),
        _ => bail!("Unknown or missing file extension for path: {}", path.display()),
    }
}

/// Picks the explicit format, else one derived from the output path, else text.
pub fn resolve_format(
    explicit: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<OutputFormat> {
    match (explicit, output) {
        (Some(format), _) => Ok(format),
        (None, Some(path)) if path.extension().is_some() => format_from_extension(path),
        _ => Ok(OutputFormat::Text),
    }
}

/// Open a file for writing
pub fn open_file_for_writing(path: &Path) -> Result<BufWriter<File>> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Read a file as a string
pub fn read_to_string(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension(Path::new("fa.dot")).unwrap(), OutputFormat::Dot);
        assert_eq!(format_from_extension(Path::new("g.JSON")).unwrap(), OutputFormat::Json);
        assert_eq!(format_from_extension(Path::new("g.src")).unwrap(), OutputFormat::Source);
        assert!(format_from_extension(Path::new("noext")).is_err());
    }

    #[test]
    fn test_resolve_format() {
        let path = PathBuf::from("out.json");
        let format = resolve_format(Some(OutputFormat::Dot), Some(&path)).unwrap();
        assert_eq!(format, OutputFormat::Dot);
        assert_eq!(resolve_format(None, Some(&path)).unwrap(), OutputFormat::Json);
        assert_eq!(resolve_format(None, Some(Path::new("out"))).unwrap(), OutputFormat::Text);
        assert_eq!(resolve_format(None, None).unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("Source".parse::<OutputFormat>().unwrap(), OutputFormat::Source);
        assert!("gfa".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_write_then_read() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("out.txt");

        let mut writer = open_file_for_writing(&path)?;
        writer.write_all(b"S A\n")?;
        writer.flush()?;
        drop(writer);

        assert_eq!(read_to_string(&path)?, "S A\n");
        Ok(())
    }
}
