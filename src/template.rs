//! Template loading and rendering.
//!
//! Templates use [Tera](https://keats.github.io/tera/), a Jinja2-style
//! engine. A [`TemplateResolver`] is bound to one template root for the whole
//! run: every file under the root is registered by its root-relative name
//! (`index.html`, `partials/nav.html`), so templates can `extends` and
//! `include` each other.
//!
//! ## Broken templates
//!
//! Each file is parsed on its own when the resolver is built. A file that
//! does not parse (or is not UTF-8) is set aside rather than failing the
//! whole root, and so is every template that extends, includes or imports
//! macros from it. The error only surfaces when one of those names is
//! rendered, so a stray draft in `templates/` cannot break pages that never
//! use it.
//!
//! ## Escaping
//!
//! Values substituted into templates whose name ends in `.html` or `.xml`
//! are HTML-escaped. Anything else (`robots.txt`, `feed.json`) renders as-is.
//! Use the `safe` filter to opt a trusted value out of escaping.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tera::ast::Node;
use tera::{Context, Template, Tera};
use thiserror::Error;
use walkdir::WalkDir;

/// Template name suffixes that get auto-escaping.
const AUTOESCAPE_SUFFIXES: &[&str] = &[".html", ".xml"];

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot list template directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Template not found: {name} (looked in {})", .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error("Template syntax error: {0}")]
    Syntax(String),
    #[error("Render error in {name}: {message}")]
    Render { name: String, message: String },
}

/// Why a template found under the root cannot be rendered.
#[derive(Debug, Clone)]
enum Defect {
    /// The file, or one it builds on, does not parse.
    Syntax(String),
    /// A parent or macro file it needs is not under the root.
    Missing(String),
}

/// Renders named templates from a single template root.
pub struct TemplateResolver {
    root: PathBuf,
    tera: Tera,
    names: BTreeSet<String>,
    defects: BTreeMap<String, Defect>,
}

impl TemplateResolver {
    /// Load every template under `root`.
    ///
    /// Only I/O failures are errors here. A missing root yields an empty
    /// resolver and every render reports [`TemplateError::NotFound`];
    /// templates that fail to parse are reported by [`render`](Self::render).
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let root = root.into();
        let files = read_templates(&root)?;
        let names: BTreeSet<String> = files.iter().map(|(name, _)| name.clone()).collect();

        let mut defects = BTreeMap::new();
        let mut parsed = BTreeMap::new();
        for (name, bytes) in files {
            let Ok(source) = String::from_utf8(bytes) else {
                defects.insert(
                    name.clone(),
                    Defect::Syntax(format!("{name} is not valid UTF-8")),
                );
                continue;
            };
            match Template::new(&name, None, &source) {
                Ok(template) => {
                    parsed.insert(name, (source, template));
                }
                Err(e) => {
                    defects.insert(name, Defect::Syntax(describe(&e)));
                }
            }
        }
        set_aside_dependents(&mut parsed, &mut defects);
        for (name, defect) in &defects {
            match defect {
                Defect::Syntax(message) => log::warn!("template {name} is unusable: {message}"),
                Defect::Missing(dependency) => {
                    log::warn!("template {name} needs missing template {dependency}")
                }
            }
        }

        let mut tera = Tera::default();
        tera.autoescape_on(AUTOESCAPE_SUFFIXES.to_vec());
        tera.add_raw_templates(
            parsed
                .into_iter()
                .map(|(name, (source, _))| (name, source)),
        )
        .map_err(|e| TemplateError::Syntax(describe(&e)))?;

        log::debug!(
            "loaded {} templates from {} ({} unusable)",
            names.len(),
            root.display(),
            defects.len()
        );
        Ok(Self {
            root,
            tera,
            names,
            defects,
        })
    }

    /// Whether a template with this root-relative name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Render `name` with `context` as its variables.
    pub fn render(
        &self,
        name: &str,
        context: &Map<String, Value>,
    ) -> Result<String, TemplateError> {
        let not_found = |name: &str| TemplateError::NotFound {
            name: name.to_string(),
            root: self.root.clone(),
        };
        if !self.contains(name) {
            return Err(not_found(name));
        }
        match self.defects.get(name) {
            Some(Defect::Syntax(message)) => return Err(TemplateError::Syntax(message.clone())),
            Some(Defect::Missing(dependency)) => return Err(not_found(dependency)),
            None => {}
        }

        let render_error = |e: tera::Error| TemplateError::Render {
            name: name.to_string(),
            message: describe(&e),
        };
        let context = Context::from_value(Value::Object(context.clone())).map_err(render_error)?;
        self.tera.render(name, &context).map_err(render_error)
    }
}

/// Move every parsed template that cannot be registered into `defects`.
///
/// A template is unusable when its parent or an imported macro file is
/// defective or absent, when an included template is defective, or when its
/// `extends` chain loops. Repeats until nothing changes, so whole chains of
/// dependents are set aside.
fn set_aside_dependents(
    parsed: &mut BTreeMap<String, (String, Template)>,
    defects: &mut BTreeMap<String, Defect>,
) {
    loop {
        let (usable, known) = (&*parsed, &*defects);
        let unusable: Vec<(String, Defect)> = usable
            .iter()
            .filter_map(|(name, (_, template))| {
                let defect = if extends_cycle(name, usable) {
                    Some(Defect::Syntax(format!("{name} has circular extends")))
                } else {
                    dependency_defect(template, usable, known)
                };
                defect.map(|defect| (name.clone(), defect))
            })
            .collect();
        if unusable.is_empty() {
            return;
        }
        for (name, defect) in unusable {
            parsed.remove(&name);
            defects.insert(name, defect);
        }
    }
}

fn dependency_defect(
    template: &Template,
    parsed: &BTreeMap<String, (String, Template)>,
    defects: &BTreeMap<String, Defect>,
) -> Option<Defect> {
    let required = template
        .parent
        .iter()
        .chain(template.imported_macro_files.iter().map(|(file, _)| file));
    for dependency in required {
        if let Some(defect) = defects.get(dependency) {
            return Some(defect.clone());
        }
        if !parsed.contains_key(dependency) {
            return Some(Defect::Missing(dependency.clone()));
        }
    }

    // A missing include is left to the engine (`ignore missing` may allow it).
    let mut includes = Vec::new();
    collect_includes(&template.ast, &mut includes);
    includes
        .iter()
        .find_map(|dependency| defects.get(dependency).cloned())
}

fn extends_cycle(name: &str, parsed: &BTreeMap<String, (String, Template)>) -> bool {
    let mut seen = BTreeSet::new();
    let mut current = Some(name);
    while let Some(name) = current {
        if !seen.insert(name) {
            return true;
        }
        current = parsed
            .get(name)
            .and_then(|(_, template)| template.parent.as_deref());
    }
    false
}

fn collect_includes(nodes: &[Node], includes: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Include(_, names, _) => includes.extend(names.iter().cloned()),
            Node::Block(_, block, _) => collect_includes(&block.body, includes),
            Node::MacroDefinition(_, definition, _) => collect_includes(&definition.body, includes),
            Node::FilterSection(_, section, _) => collect_includes(&section.body, includes),
            Node::Forloop(_, forloop, _) => {
                collect_includes(&forloop.body, includes);
                if let Some(body) = &forloop.empty_body {
                    collect_includes(body, includes);
                }
            }
            Node::If(branches, _) => {
                for (_, _, body) in &branches.conditions {
                    collect_includes(body, includes);
                }
                if let Some((_, body)) = &branches.otherwise {
                    collect_includes(body, includes);
                }
            }
            _ => {}
        }
    }
}

/// Read all template files under `root` as `(name, bytes)` pairs.
///
/// Names are root-relative with `/` separators. Hidden files are skipped.
fn read_templates(root: &Path) -> Result<Vec<(String, Vec<u8>)>, TemplateError> {
    if !root.is_dir() {
        log::warn!("template directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let bytes = fs::read(entry.path()).map_err(|source| TemplateError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        templates.push((template_name(relative), bytes));
    }
    Ok(templates)
}

fn template_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Flatten a Tera error and its causes into one line.
///
/// Tera's top-level message is only "Failed to render 'x'"; the useful part
/// (which variable, which line) lives in the source chain.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut cause = std::error::Error::source(error);
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = std::error::Error::source(inner);
    }
    message
}
