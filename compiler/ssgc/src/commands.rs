//! Command implementations behind the `ssgc` binary.

use std::path::{Path, PathBuf};

use ssg_classify::Classifier;
use ssg_ir::{Item, TypeDecl, TypePool, WellKnown};

use crate::tracing_setup::init_tracing;
use crate::{
    common_prefix, DriverError, RealFs, GenerationReport, Generator, GeneratorConfig,
    ModelDocument, ParallelConfig, ProjectLayout,
};

/// Options for `ssgc generate`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub model: PathBuf,
    /// Directory to write generated files into; nothing is written if unset.
    pub out: Option<PathBuf>,
    /// Project root, skipping discovery.
    pub project: Option<PathBuf>,
    pub threads: usize,
}

impl GenerateOptions {
    /// Parse the arguments following `generate`.
    pub fn parse(args: &[String]) -> Result<Self, DriverError> {
        let mut options = GenerateOptions::default();
        let mut model = None;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| DriverError::Usage(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--out" | "-o" => options.out = Some(PathBuf::from(value(arg.as_str())?)),
                "--project" => options.project = Some(PathBuf::from(value(arg.as_str())?)),
                "-j" | "--threads" => {
                    let raw = value(arg.as_str())?;
                    options.threads = raw.parse().map_err(|_| {
                        DriverError::Usage(format!("invalid thread count `{raw}`"))
                    })?;
                }
                flag if flag.starts_with('-') => {
                    return Err(DriverError::Usage(format!("unknown option `{flag}`")));
                }
                path if model.is_none() => model = Some(PathBuf::from(path)),
                extra => {
                    return Err(DriverError::Usage(format!("unexpected argument `{extra}`")));
                }
            }
        }

        options.model = model.ok_or_else(|| DriverError::Usage("missing model file".into()))?;
        Ok(options)
    }
}

/// Run a full generation pass and write its output.
pub fn generate(options: &GenerateOptions) -> Result<GenerationReport, DriverError> {
    let doc = ModelDocument::load(&options.model)?;

    let layout = match &options.project {
        Some(root) => ProjectLayout::new(root.clone()),
        None => {
            let paths = doc.paths();
            ProjectLayout::discover(&paths, &RealFs)
                .ok_or_else(|| DriverError::ProjectNotFound(common_prefix(&paths)))?
        }
    };

    // A malformed control file stops the pass before anything is generated.
    let config = GeneratorConfig::load(&layout.control_file())?;
    init_tracing(config.debug);
    tracing::debug!(root = %layout.root().display(), ?config, "pass configured");

    let pool = TypePool::new();
    let units = doc.lower(&pool)?;
    let report = Generator::new(&pool, layout, config)
        .with_parallel(ParallelConfig::with_threads(options.threads))
        .run(&units)?;

    if let Some(out) = &options.out {
        write_outputs(out, &report)?;
    }
    Ok(report)
}

/// Write every generated file into `out`. Returns the number written.
pub fn write_outputs(out: &Path, report: &GenerationReport) -> Result<usize, DriverError> {
    std::fs::create_dir_all(out).map_err(|source| DriverError::Write {
        path: out.to_path_buf(),
        source,
    })?;

    let mut written = 0;
    for file in report.generated() {
        let path = out.join(&file.hint_name);
        std::fs::write(&path, &file.text).map_err(|source| DriverError::Write {
            path: path.clone(),
            source,
        })?;
        written += 1;
    }
    Ok(written)
}

/// One line per annotated member describing its classification.
pub fn classify(model: &Path) -> Result<Vec<String>, DriverError> {
    let doc = ModelDocument::load(model)?;
    let pool = TypePool::new();
    let wk = WellKnown::resolve(&pool);
    let units = doc.lower(&pool)?;
    let classifier = Classifier::new(&pool, &wk);

    let mut lines = Vec::new();
    for unit in &units {
        describe_items(classifier, &pool, &unit.path, &unit.items, "", &mut lines);
    }
    Ok(lines)
}

fn qualify(outer: &str, name: &str) -> String {
    if outer.is_empty() {
        name.to_owned()
    } else {
        format!("{outer}.{name}")
    }
}

fn describe_items(
    classifier: Classifier<'_>,
    pool: &TypePool,
    file: &str,
    items: &[Item],
    namespace: &str,
    lines: &mut Vec<String>,
) {
    for item in items {
        match item {
            Item::Type(decl) => describe_type(classifier, pool, file, decl, namespace, lines),
            Item::Namespace(ns) => {
                let path = qualify(namespace, &ns.name);
                describe_items(classifier, pool, file, &ns.items, &path, lines);
            }
        }
    }
}

fn describe_type(
    classifier: Classifier<'_>,
    pool: &TypePool,
    file: &str,
    decl: &TypeDecl,
    outer: &str,
    lines: &mut Vec<String>,
) {
    let path = qualify(outer, &decl.name);
    for member in decl.members.iter().filter(|m| classifier.is_annotated(m)) {
        let line = match classifier.classify_member(member) {
            Ok(cls) => format!(
                "{file}: {path}.{}: {} {} <{}>{}",
                member.name,
                cls.container(),
                cls.kind(),
                pool.render_list(cls.element_types()),
                if cls.preserves_identity() { " identity" } else { "" },
            ),
            Err(err) => format!("{file}: {path}.{}: {err}", member.name),
        };
        lines.push(line);
    }
    for nested in &decl.nested {
        describe_type(classifier, pool, file, nested, &path, lines);
    }
}

/// Parse a control file and return the effective settings.
pub fn check_config(path: &Path) -> Result<GeneratorConfig, DriverError> {
    Ok(GeneratorConfig::load(path)?)
}
