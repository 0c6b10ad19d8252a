//! Runs every `cases/*.json` scenario through a full translation and diffs
//! the discovered definitions against the case's expectations.
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Deserialize;

use typebridge::path_de::from_slice_with_path;
use typebridge::settings::SettingsFile;
use typebridge::{ApiDefinition, SourceModel, SourceType, TranslationSettings, translate_roots};

static CASES_DIR: Lazy<PathBuf> = Lazy::new(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("cases"));

// ————————————————————————————————————————————————————————————————————————————
// CASE FILES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Case {
    description: String,
    #[serde(default)]
    settings: SettingsFile,
    roots: Vec<String>,
    model: SourceModel,
    expect: Expect,
}

/// Only what is listed is checked.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Expect {
    /// class name → property names, in order
    classes: Option<IndexMap<String, Vec<String>>>,
    enums: Option<Vec<String>>,
    unions: Option<IndexMap<String, ExpectUnion>>,
    aliases: Option<Vec<String>>,
    black_boxes: Option<Vec<String>>,
    /// substring of the expected failure
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExpectUnion {
    discriminator: String,
    /// discriminator value → subtype name
    types: IndexMap<String, String>,
}

// ————————————————————————————————————————————————————————————————————————————
// CHECKS
// ————————————————————————————————————————————————————————————————————————————

fn compare<T: PartialEq + Debug>(problems: &mut Vec<String>, what: &str, expected: &T, actual: &T) {
    if expected != actual {
        problems.push(format!("{what}: expected {expected:?}, got {actual:?}"));
    }
}

fn check(case: &Case, api: &ApiDefinition) -> Vec<String> {
    let mut problems = Vec::new();

    if let Some(classes) = case.expect.classes.as_ref() {
        let actual: IndexMap<String, Vec<String>> = api.class_definitions()
            .map(|c| (c.name.to_string(), c.property_names().into_iter().map(str::to_owned).collect()))
            .collect();
        compare(&mut problems, "classes", classes, &actual);
    }
    if let Some(enums) = case.expect.enums.as_ref() {
        let actual: Vec<String> = api.enum_definitions().map(|e| e.name.to_string()).collect();
        compare(&mut problems, "enums", enums, &actual);
    }
    if let Some(unions) = case.expect.unions.as_ref() {
        for (name, expected) in unions {
            let Some(union) = api.discriminated_union(name) else {
                problems.push(format!("union {name}: missing"));
                continue;
            };
            let actual: IndexMap<String, String> = union.types.iter()
                .map(|(value, class)| (value.clone(), class.name.to_string()))
                .collect();
            compare(&mut problems, &format!("union {name} discriminator"), &expected.discriminator, &union.discriminator);
            compare(&mut problems, &format!("union {name} types"), &expected.types, &actual);
        }
    }
    if let Some(aliases) = case.expect.aliases.as_ref() {
        let actual: Vec<String> = api.type_aliases().keys().map(|n| n.to_string()).collect();
        compare(&mut problems, "aliases", aliases, &actual);
    }
    if let Some(black_boxes) = case.expect.black_boxes.as_ref() {
        let actual: Vec<String> = api.black_boxes().map(|n| n.to_string()).collect();
        compare(&mut problems, "black boxes", black_boxes, &actual);
    }
    problems
}

fn run_case(path: &Path) -> anyhow::Result<Vec<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let case = from_slice_with_path::<Case>(&bytes).with_context(|| format!("invalid case {}", path.display()))?;
    eprintln!("{} {}", "——".dimmed(), case.description);

    let mut settings = TranslationSettings::new();
    settings.apply_file(&case.settings)?;
    let roots: Vec<SourceType> = case.roots.iter().map(SourceType::basic).collect();

    match (translate_roots(&settings, &case.model, &roots), case.expect.error.as_ref()) {
        (Ok(api), None) => Ok(check(&case, &api)),
        (Ok(_), Some(expected)) => Ok(vec![format!("expected failure containing `{expected}`, translation succeeded")]),
        (Err(error), Some(expected)) if error.to_string().contains(expected.as_str()) => Ok(Vec::new()),
        (Err(error), _) => Ok(vec![format!("unexpected failure: {error}")]),
    }
}

fn main() -> ExitCode {
    let mut paths: Vec<PathBuf> = match std::fs::read_dir(&*CASES_DIR) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|x| x == "json"))
            .collect(),
        Err(error) => {
            eprintln!("{} cannot list {}: {error}", "error:".red().bold(), CASES_DIR.display());
            return ExitCode::FAILURE;
        }
    };
    paths.sort();

    let mut failed = 0;
    for path in &paths {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        match run_case(path) {
            Ok(problems) if problems.is_empty() => eprintln!("✅ {name}"),
            Ok(problems) => {
                failed += 1;
                eprintln!("❌ {name}");
                for problem in problems {
                    eprintln!("   {}", problem.red());
                }
            }
            Err(error) => {
                failed += 1;
                eprintln!("❌ {name}: {error:#}");
            }
        }
    }

    eprintln!("{} of {} cases passed", paths.len() - failed, paths.len());
    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
