//! Template loading and placeholder substitution
//!
//! Templates are plain text with `{{name}}` placeholders. There is no control
//! flow: every loop and conditional lives in the planner, which hands fully
//! prepared strings to [`substitute`].
//!
//! The default template set is compiled into the binary. A
//! [`DirTemplateStore`] overrides individual templates from a directory
//! laid out like the embedded set (`<dir>/view/module/image.code`, ...).

use crate::classify::FormType;
use crate::error::{Result, ScaffoldError};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Template file extension
pub const TEMPLATE_EXTENSION: &str = "code";

/// Form field fragment used by the create and edit views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormModule {
    /// Single-line input
    Input,
    /// Single image upload
    Image,
    /// Multiple image upload
    Images,
    /// Single file upload
    File,
    /// Multiple file upload
    Files,
    /// Rich-text editor
    Editor,
    /// Relation-backed select box
    Select,
    /// Multi-line text
    Textarea,
    /// Sort weight
    Sort,
    /// Date picker
    Date,
    /// On/off switch
    Switch,
}

impl FormModule {
    /// Every form module
    pub const ALL: [Self; 11] = [
        Self::Input,
        Self::Image,
        Self::Images,
        Self::File,
        Self::Files,
        Self::Editor,
        Self::Select,
        Self::Textarea,
        Self::Sort,
        Self::Date,
        Self::Switch,
    ];

    /// Module rendering a column of the given form type
    #[must_use]
    pub const fn for_form_type(form_type: FormType) -> Self {
        match form_type {
            FormType::Text => Self::Input,
            FormType::Image => Self::Image,
            FormType::Images => Self::Images,
            FormType::File => Self::File,
            FormType::Files => Self::Files,
            FormType::Date => Self::Date,
            FormType::Switch => Self::Switch,
            FormType::Editor => Self::Editor,
            FormType::Sort => Self::Sort,
            FormType::Select => Self::Select,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Image => "image",
            Self::Images => "images",
            Self::File => "file",
            Self::Files => "files",
            Self::Editor => "editor",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Sort => "sort",
            Self::Date => "date",
            Self::Switch => "switch",
        }
    }
}

/// Identifier of one template in the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Request handler class
    Controller,
    /// Join-aware `index` method, embedded in the controller when relations exist
    ControllerIndexMethod,
    /// Data model class
    Model,
    /// One relation accessor, embedded in the primary model
    ModelRelation,
    /// List page
    ViewIndex,
    /// Create/edit form wrapper
    ViewForm,
    /// One form field fragment
    Module(FormModule),
    /// Client-side table script
    Script,
}

impl TemplateId {
    /// Every template in the set
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut ids = vec![
            Self::Controller,
            Self::ControllerIndexMethod,
            Self::Model,
            Self::ModelRelation,
            Self::ViewIndex,
            Self::ViewForm,
            Self::Script,
        ];
        ids.extend(FormModule::ALL.into_iter().map(Self::Module));
        ids
    }

    /// Slash-separated name, also the relative path without extension
    ///
    /// # Examples
    ///
    /// ```
    /// # use crud_scaffold::template::{FormModule, TemplateId};
    /// assert_eq!(TemplateId::ControllerIndexMethod.name(), "controller/indexMethod");
    /// assert_eq!(TemplateId::Module(FormModule::Image).name(), "view/module/image");
    /// ```
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Controller => "controller/controller".to_string(),
            Self::ControllerIndexMethod => "controller/indexMethod".to_string(),
            Self::Model => "model/model".to_string(),
            Self::ModelRelation => "model/relation".to_string(),
            Self::ViewIndex => "view/index".to_string(),
            Self::ViewForm => "view/form".to_string(),
            Self::Module(module) => format!("view/module/{}", module.name()),
            Self::Script => "static/js".to_string(),
        }
    }

    /// Relative file path of this template inside a template directory
    #[must_use]
    pub fn relative_path(self) -> PathBuf {
        let mut path: PathBuf = self.name().split('/').collect();
        path.set_extension(TEMPLATE_EXTENSION);
        path
    }
}

/// Source of raw template text
pub trait TemplateStore {
    /// Raw text of a template
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] if the template cannot be read.
    fn load(&self, id: TemplateId) -> Result<String>;
}

/// The built-in template set
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Built-in text of a template
    #[must_use]
    pub const fn text(id: TemplateId) -> &'static str {
        match id {
            TemplateId::Controller => include_str!("../templates/controller/controller.code"),
            TemplateId::ControllerIndexMethod => {
                include_str!("../templates/controller/indexMethod.code")
            }
            TemplateId::Model => include_str!("../templates/model/model.code"),
            TemplateId::ModelRelation => include_str!("../templates/model/relation.code"),
            TemplateId::ViewIndex => include_str!("../templates/view/index.code"),
            TemplateId::ViewForm => include_str!("../templates/view/form.code"),
            TemplateId::Script => include_str!("../templates/static/js.code"),
            TemplateId::Module(module) => match module {
                FormModule::Input => include_str!("../templates/view/module/input.code"),
                FormModule::Image => include_str!("../templates/view/module/image.code"),
                FormModule::Images => include_str!("../templates/view/module/images.code"),
                FormModule::File => include_str!("../templates/view/module/file.code"),
                FormModule::Files => include_str!("../templates/view/module/files.code"),
                FormModule::Editor => include_str!("../templates/view/module/editor.code"),
                FormModule::Select => include_str!("../templates/view/module/select.code"),
                FormModule::Textarea => include_str!("../templates/view/module/textarea.code"),
                FormModule::Sort => include_str!("../templates/view/module/sort.code"),
                FormModule::Date => include_str!("../templates/view/module/date.code"),
                FormModule::Switch => include_str!("../templates/view/module/switch.code"),
            },
        }
    }

    /// Write the built-in set under `dir`, returning the written paths
    ///
    /// Existing files are left untouched unless `overwrite` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] if a directory or file cannot be
    /// written.
    pub fn export(dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for id in TemplateId::all() {
            let path = dir.join(id.relative_path());
            if path.exists() && !overwrite {
                tracing::debug!(path = %path.display(), "template exists, skipping");
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    ScaffoldError::Template(format!("{}: {e}", parent.display()))
                })?;
            }
            fs::write(&path, Self::text(id))
                .map_err(|e| ScaffoldError::Template(format!("{}: {e}", path.display())))?;
            written.push(path);
        }
        Ok(written)
    }
}

impl TemplateStore for EmbeddedTemplates {
    fn load(&self, id: TemplateId) -> Result<String> {
        Ok(Self::text(id).to_string())
    }
}

/// Templates read from a directory, falling back to the built-in set
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    dir: PathBuf,
}

impl DirTemplateStore {
    /// Store over `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateStore for DirTemplateStore {
    fn load(&self, id: TemplateId) -> Result<String> {
        let path = self.dir.join(id.relative_path());
        if !path.is_file() {
            return Ok(EmbeddedTemplates::text(id).to_string());
        }

        tracing::debug!(template = %id.name(), path = %path.display(), "using template override");
        fs::read_to_string(&path)
            .map_err(|e| ScaffoldError::Template(format!("{}: {e}", path.display())))
    }
}

/// Placeholder values keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: IndexMap<String, String>,
}

impl Bindings {
    /// Empty binding set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a binding
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Value bound to `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("Invalid regex"))
}

/// Replace every bound `{{name}}` placeholder with its value
///
/// Values are inserted verbatim and never rescanned. Placeholders without a
/// binding are left exactly as written.
///
/// # Examples
///
/// ```
/// # use crud_scaffold::template::{substitute, Bindings};
/// let bindings = Bindings::new().with("field", "title");
/// assert_eq!(substitute("name=\"{{field}}\" {{other}}", &bindings), "name=\"title\" {{other}}");
/// ```
#[must_use]
pub fn substitute(text: &str, bindings: &Bindings) -> String {
    placeholder()
        .replace_all(text, |caps: &Captures<'_>| {
            bindings
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), ToString::to_string)
        })
        .into_owned()
}

/// Load a template and substitute `bindings` into it
///
/// # Errors
///
/// Returns [`ScaffoldError::Template`] if the template cannot be loaded.
pub fn render(store: &dyn TemplateStore, id: TemplateId, bindings: &Bindings) -> Result<String> {
    Ok(substitute(&store.load(id)?, bindings))
}
