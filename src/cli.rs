//! Minimal CLI: source model dump(s) → API definition JSON
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use typebridge::path_de::from_slice_with_path;
use typebridge::settings::SettingsFile;
use typebridge::{ApiDefinition, SourceModel, SourceType, TranslationSettings, translate_roots};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate serialized class graphs into API type definitions for client codegen
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// translate and emit the API definition JSON
    Translate(TranslateOut),
    /// translate and report what was discovered, without writing anything
    Check(CheckOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more model dumps. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// qualified root class name(s); every class in the model if omitted
    #[arg(long, num_args = 1..)]
    root: Vec<String>,

    /// settings .json file (black box / imported patterns, name overrides)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// regex over qualified names to translate as opaque black boxes
    #[arg(long)]
    black_box: Vec<String>,

    /// regex over display names already provided by the client
    #[arg(long)]
    import: Vec<String>,

    /// display name override, as `qualified.Name=Display`
    #[arg(long)]
    rename: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct TranslateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory; one `<stem>.api.json` per input (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Settings file first, then command line flags on top.
    fn translation_settings(&self) -> anyhow::Result<TranslationSettings> {
        let mut settings = TranslationSettings::new();
        if let Some(path) = self.settings.as_ref() {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            let file = from_slice_with_path::<SettingsFile>(&bytes)
                .with_context(|| format!("invalid settings file {}", path.display()))?;
            settings.apply_file(&file)?;
        }
        for pattern in &self.black_box {
            settings.black_box_classes.add_pattern(pattern)
                .with_context(|| format!("invalid --black-box pattern `{pattern}`"))?;
        }
        for pattern in &self.import {
            settings.imported_classes.add_pattern(pattern)
                .with_context(|| format!("invalid --import pattern `{pattern}`"))?;
        }
        for rename in &self.rename {
            let Some((qualified, display)) = rename.split_once('=') else {
                bail!("--rename expects `qualified.Name=Display`, got `{rename}`");
            };
            settings.name_translator.register_class_name(qualified.trim(), display.trim());
        }
        Ok(settings)
    }

    fn roots(&self, model: &SourceModel) -> Vec<SourceType> {
        if self.root.is_empty() {
            return model.classes().map(|c| c.basic_type()).collect();
        }
        self.root.iter().map(SourceType::basic).collect()
    }

    /// Every input translated in its own run, in parallel. Results keep input order.
    fn translate_all(&self) -> anyhow::Result<Vec<(PathBuf, anyhow::Result<ApiDefinition>)>> {
        let settings = self.translation_settings()?;
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        info!("translating {} input(s)", source_paths.len());
        Ok(source_paths
            .into_par_iter()
            .map(|path| {
                let result = self.translate_file(&settings, &path);
                (path, result)
            })
            .collect())
    }

    fn translate_file(&self, settings: &TranslationSettings, path: &Path) -> anyhow::Result<ApiDefinition> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read source file {}", path.display()))?;
        let model = from_slice_with_path::<SourceModel>(&bytes)
            .with_context(|| format!("failed to parse model file {}", path.display()))?;
        let roots = self.roots(&model);
        info!("{}: {} classes, {} roots", path.display(), model.len(), roots.len());
        let api = translate_roots(settings, &model, &roots)
            .with_context(|| format!("failed to translate {}", path.display()))?;
        Ok(api)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Logs go to stderr so stdout stays clean JSON.
    pub fn init_logging(&self) {
        let default = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Translate(target) => {
                let results = target.input_settings.translate_all()?;
                let total = results.len();
                let mut failed = 0;
                for (path, result) in results {
                    let api = match result {
                        Ok(api) => api,
                        Err(error) => {
                            failed += 1;
                            eprintln!("{} {error:#}", "✗".red().bold());
                            continue;
                        }
                    };
                    let api_src = serde_json::to_string_pretty(&api)?;
                    if let Some(out_dir) = target.out_dir.as_ref() {
                        std::fs::create_dir_all(out_dir)
                            .with_context(|| format!("failed to create {}", out_dir.display()))?;
                        let out = out_dir.join(output_file_name(&path));
                        std::fs::write(&out, &api_src)
                            .with_context(|| format!("failed to write {}", out.display()))?;
                        eprintln!("{} {} → {}", "✓".green().bold(), path.display(), out.display());
                    } else {
                        println!("{api_src}");
                    }
                }
                if failed > 0 {
                    bail!("{failed} of {total} input(s) failed");
                }
                Ok(())
            }
            Command::Check(target) => {
                let results = target.input_settings.translate_all()?;
                let total = results.len();
                let mut failed = 0;
                for (path, result) in results {
                    match result {
                        Ok(api) => eprintln!(
                            "{} {}: {} classes, {} enums, {} unions, {} aliases, {} black boxes",
                            "✓".green().bold(),
                            path.display(),
                            api.class_definition_count(),
                            api.enum_definitions().count(),
                            api.discriminated_unions().count(),
                            api.type_aliases().len(),
                            api.black_boxes().count(),
                        ),
                        Err(error) => {
                            failed += 1;
                            eprintln!("{} {error:#}", "✗".red().bold());
                        }
                    }
                }
                if failed > 0 {
                    bail!("{failed} of {total} input(s) failed");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn output_file_name(input: &Path) -> String {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_else(|| "api".into());
    format!("{stem}.api.json")
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // explicit glob matching nothing is an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
