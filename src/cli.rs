//! Minimal CLI: JSON corpus in → TypeScript declarations out.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use serde_json::Value;

use crate::codegen::{Codegen, Mode, pascal_component};
use crate::error::Error;
use crate::inference::Inference;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer the TypeScript shape of a JSON array of records
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// input .json file containing an array of records
    input: Option<PathBuf>,

    /// emit one fully expanded type alias instead of named interfaces
    #[arg(long, default_value_t = false)]
    inline: bool,

    /// top-level type name (defaults to the input file's base name)
    #[arg(long)]
    root_name: Option<String>,

    /// JSON Pointer to select a subnode of the document before analysis
    /// (e.g. /data/items)
    #[arg(long)]
    json_pointer: Option<String>,

    /// print the inferred schema as JSON instead of generated code
    #[arg(long, default_value_t = false)]
    dump_schema: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Parse/shape problems are reported but leave the exit status at zero;
    /// only a missing input (or unusable filesystem) fails the process.
    pub fn run(&self) -> ExitCode {
        let Some(input) = self.input.as_deref() else {
            report_usage(&Error::Usage {
                candidates: candidate_inputs(Path::new(".")),
            });
            return ExitCode::FAILURE;
        };
        if !input.exists() {
            eprintln!(
                "{} input file {} does not exist",
                "error:".red().bold(),
                input.display()
            );
            return ExitCode::FAILURE;
        }
        let source = match std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))
        {
            Ok(source) => source,
            Err(error) => {
                eprintln!("{} {error:#}", "error:".red().bold());
                return ExitCode::FAILURE;
            }
        };
        let output = match self.analyze_source(input, &source) {
            Ok(output) => output,
            Err(error) => {
                eprintln!("{} {error}", "error:".red().bold());
                return ExitCode::SUCCESS;
            }
        };
        match self.write_output(&output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("{} {error:#}", "error:".red().bold());
                ExitCode::FAILURE
            }
        }
    }

    fn analyze_source(&self, path: &Path, source: &str) -> crate::error::Result<String> {
        let document: Value = serde_json::from_str(source).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let document = match self.json_pointer.as_deref() {
            None => document,
            Some(pointer) => {
                document
                    .pointer(pointer)
                    .cloned()
                    .ok_or_else(|| Error::PointerNotFound {
                        path: path.to_path_buf(),
                        pointer: pointer.to_string(),
                    })?
            }
        };
        let Value::Array(records) = document else {
            return Err(Error::NotAnArray {
                path: path.to_path_buf(),
            });
        };

        let mut inference = Inference::new();
        for record in &records {
            inference.observe_value(record);
        }
        let Some(schema) = inference.solve() else {
            return Err(Error::EmptyArray {
                path: path.to_path_buf(),
            });
        };

        if self.dump_schema {
            return Ok(serde_json::to_string_pretty(&schema).unwrap());
        }

        let root_name = self
            .root_name
            .clone()
            .unwrap_or_else(|| root_name_from_path(path));
        let mode = if self.inline { Mode::Inline } else { Mode::Nominal };
        let mut cg = Codegen::new(mode);
        cg.emit(&schema, &root_name);
        Ok(cg.into_string())
    }

    fn write_output(&self, output: &str) -> anyhow::Result<()> {
        match self.out.as_deref() {
            Some(out) => {
                if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(out, output)
                    .with_context(|| format!("failed to write {}", out.display()))?;
            }
            None => println!("{output}"),
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_usage(error: &Error) {
    eprintln!("{} {error}", "error:".red().bold());
    eprintln!("usage: json-tsd <file.json> [--inline] [--root-name NAME] [--out PATH]");
    eprintln!("  --inline: generate one inline type alias instead of interfaces");
    if let Error::Usage { candidates } = error {
        if !candidates.is_empty() {
            eprintln!();
            eprintln!("available inputs:");
            for candidate in candidates {
                eprintln!("  - {candidate}");
            }
        }
    }
}

/// `.json` files in `dir` that look like data rather than package or lock
/// metadata, sorted by name.
pub fn candidate_inputs(dir: &Path) -> Vec<String> {
    let pattern = dir.join("*.json");
    let Ok(entries) = glob::glob(&pattern.to_string_lossy()) else {
        return Vec::new();
    };
    let mut out: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            entry
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
        .filter(|name| !name.contains("package") && !name.contains("lock"))
        .collect();
    out.sort();
    out
}

/// Derive the root type name from the file's base name: hyphen segments,
/// each capitalized, concatenated, non-alphanumerics stripped.
pub fn root_name_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let name: String = stem.split('-').map(pascal_component).collect();
    if name.is_empty() { "Root".to_string() } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn interface_for(path: &str, source: &str) -> crate::error::Result<String> {
        let cli = CommandLineInterface {
            input: Some(PathBuf::from(path)),
            inline: false,
            root_name: None,
            json_pointer: None,
            dump_schema: false,
            out: None,
        };
        cli.analyze_source(Path::new(path), source)
    }

    #[test]
    fn root_name_derivation() {
        assert_eq!(root_name_from_path(Path::new("user-data.json")), "UserData");
        assert_eq!(root_name_from_path(Path::new("dir/characters.json")), "Characters");
        assert_eq!(root_name_from_path(Path::new("weird__name.json")), "Weirdname");
        assert_eq!(root_name_from_path(Path::new("2024-stats.json")), "2024Stats");
        assert_eq!(root_name_from_path(Path::new("---.json")), "Root");
    }

    #[test]
    fn candidate_listing_skips_package_and_lock_metadata() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.json", "package.json", "package-lock.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "[]").unwrap();
        }
        assert_eq!(candidate_inputs(dir.path()), vec!["a.json".to_string()]);
    }

    #[test]
    fn root_name_comes_from_the_file_stem() {
        let output = interface_for("point-list.json", r#"[{"x": 1}]"#).unwrap();
        assert_eq!(output, "interface PointList {\n  x: number;\n}\n\n");
    }

    #[test]
    fn parse_failure_names_the_file() {
        let error = interface_for("bad.json", "{ nope").unwrap_err();
        assert!(matches!(error, Error::Parse { .. }));
        assert!(error.to_string().starts_with("failed to parse bad.json"));
    }

    #[test]
    fn non_array_document_is_a_shape_diagnostic() {
        let error = interface_for("obj.json", r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(error, Error::NotAnArray { .. }));
    }

    #[test]
    fn empty_array_is_a_shape_diagnostic() {
        let error = interface_for("empty.json", "[]").unwrap_err();
        assert!(matches!(error, Error::EmptyArray { .. }));
    }

    #[test]
    fn json_pointer_selects_the_corpus() {
        let cli = CommandLineInterface {
            input: Some(PathBuf::from("wrapped.json")),
            inline: false,
            root_name: Some("Item".to_string()),
            json_pointer: Some("/data/items".to_string()),
            dump_schema: false,
            out: None,
        };
        let source = r#"{"data": {"items": [{"id": 7}]}}"#;
        let output = cli.analyze_source(Path::new("wrapped.json"), source).unwrap();
        assert_eq!(output, "interface Item {\n  id: number;\n}\n\n");

        let cli = CommandLineInterface {
            json_pointer: Some("/data/missing".to_string()),
            ..cli
        };
        let error = cli.analyze_source(Path::new("wrapped.json"), source).unwrap_err();
        assert!(matches!(error, Error::PointerNotFound { .. }));
    }

    #[test]
    fn dump_schema_prints_the_debug_view() {
        let cli = CommandLineInterface {
            input: Some(PathBuf::from("a.json")),
            inline: false,
            root_name: None,
            json_pointer: None,
            dump_schema: true,
            out: None,
        };
        let output = cli
            .analyze_source(Path::new("a.json"), r#"[{"n": 1}]"#)
            .unwrap();
        let view: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            view,
            serde_json::json!({
                "type": "object",
                "properties": { "n": { "type": "number" } },
            })
        );
    }
}
