//! Artifact planning
//!
//! Binds classified tables and relations to the template set, producing the
//! full set of output files for one build:
//!
//! - one data model per table (primary first, then relations in declaration order)
//! - one request handler
//! - list, create and edit views
//! - one client-side table script
//!
//! Planning is pure: nothing is read from or written to disk here apart from
//! what the [`TemplateStore`] does to load templates.

use crate::classify::ClassifiedTable;
use crate::error::{Result, ScaffoldError};
use crate::naming::{NamingTransformer, OutputNaming};
use crate::relation::Relation;
use crate::schema::Column;
use crate::template::{render, substitute, Bindings, FormModule, TemplateId, TemplateStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Output directory layout (`[layout]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    /// Project root every other directory is relative to
    pub root: PathBuf,
    /// Data model directory
    pub model_dir: PathBuf,
    /// Request handler directory
    pub controller_dir: PathBuf,
    /// View directory
    pub view_dir: PathBuf,
    /// Script directory
    pub script_dir: PathBuf,
    /// Data model and request handler file extension
    pub source_extension: String,
    /// View file extension
    pub view_extension: String,
    /// Script file extension
    pub script_extension: String,
    /// Namespace of generated models
    pub model_namespace: String,
    /// Base namespace of generated request handlers
    pub controller_namespace: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            model_dir: PathBuf::from("app/admin/model"),
            controller_dir: PathBuf::from("app/admin/controller"),
            view_dir: PathBuf::from("app/admin/view"),
            script_dir: PathBuf::from("public/static/admin/js"),
            source_extension: "php".to_string(),
            view_extension: "html".to_string(),
            script_extension: "js".to_string(),
            model_namespace: r"app\admin\model".to_string(),
            controller_namespace: r"app\admin\controller".to_string(),
        }
    }
}

impl OutputLayout {
    /// Model file for `model_name`
    #[must_use]
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.root
            .join(&self.model_dir)
            .join(format!("{model_name}.{}", self.source_extension))
    }

    /// Request handler file
    #[must_use]
    pub fn controller_path(&self, naming: &OutputNaming) -> PathBuf {
        nested(&self.root.join(&self.controller_dir), &naming.controller, &self.source_extension)
    }

    /// View page `page` (`index`, `add`, `edit`)
    #[must_use]
    pub fn view_path(&self, naming: &OutputNaming, page: &str) -> PathBuf {
        let dir = naming
            .view
            .iter()
            .fold(self.root.join(&self.view_dir), |dir, segment| dir.join(segment));
        dir.join(format!("{page}.{}", self.view_extension))
    }

    /// Script file
    #[must_use]
    pub fn script_path(&self, naming: &OutputNaming) -> PathBuf {
        nested(&self.root.join(&self.script_dir), &naming.script, &self.script_extension)
    }

    /// Fully qualified class of `model_name`
    #[must_use]
    pub fn model_reference(&self, model_name: &str) -> String {
        format!(r"{}\{model_name}", self.model_namespace)
    }

    /// Namespace of the request handler, including package segments
    #[must_use]
    pub fn controller_namespace(&self, naming: &OutputNaming) -> String {
        std::iter::once(self.controller_namespace.as_str())
            .chain(naming.controller_package().iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(r"\")
    }
}

fn nested(base: &Path, segments: &[String], extension: &str) -> PathBuf {
    match segments.split_last() {
        Some((last, dirs)) => dirs
            .iter()
            .fold(base.to_path_buf(), |dir, segment| dir.join(segment))
            .join(format!("{last}.{extension}")),
        None => base.join(format!("index.{extension}")),
    }
}

/// Rendering details (`[render]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Columns left out of create and edit forms
    pub immutable_fields: Vec<String>,
    /// Columns always rendered as multi-line text
    pub textarea_fields: Vec<String>,
    /// Edit form value expression, `{{field}}` is the column name
    pub edit_value: String,
    /// Attribute marking a form field as required
    pub required_marker: String,
    /// Indent between consecutive form fields
    pub field_indent: String,
    /// Indent between consecutive join lines in the request handler
    pub join_indent: String,
    /// Indent between consecutive script column descriptors
    pub column_indent: String,
    /// Title of the trailing action column
    pub action_title: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            immutable_fields: vec!["id".to_string(), "create_time".to_string()],
            textarea_fields: vec!["remark".to_string()],
            edit_value: "{$row.{{field}}|default=''}".to_string(),
            required_marker: r#"lay-verify="required""#.to_string(),
            field_indent: " ".repeat(8),
            join_indent: " ".repeat(16),
            column_indent: " ".repeat(20),
            action_title: "操作".to_string(),
        }
    }
}

/// Kind of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Data model
    Model,
    /// Request handler
    Controller,
    /// List view
    IndexView,
    /// Create view
    AddView,
    /// Edit view
    EditView,
    /// Client-side table script
    Script,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::IndexView => "index view",
            Self::AddView => "add view",
            Self::EditView => "edit view",
            Self::Script => "script",
        })
    }
}

/// Generated file information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Output path, rooted at the layout root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// What the file is
    pub kind: ArtifactKind,
    /// File description for user feedback
    pub description: String,
}

/// Every file of one build, in generation order, paths unique
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedArtifact {
    files: Vec<GeneratedFile>,
}

impl GeneratedArtifact {
    /// Append a file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if another file already
    /// targets the same path.
    pub fn push(&mut self, file: GeneratedFile) -> Result<()> {
        if let Some(existing) = self.files.iter().find(|f| f.path == file.path) {
            return Err(ScaffoldError::Configuration(format!(
                "{} and {} both target {}",
                existing.description,
                file.description,
                file.path.display()
            )));
        }
        self.files.push(file);
        Ok(())
    }

    /// Files in generation order
    #[must_use]
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// Output paths in generation order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    /// File targeting `path`
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Files of the given kind
    pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing was planned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A relation together with its classified columns
#[derive(Debug, Clone)]
pub struct RelationPlan<'a> {
    /// Declared relation
    pub relation: &'a Relation,
    /// Related table after filtering and classification
    pub columns: ClassifiedTable,
}

/// Binds classified data to templates
pub struct ArtifactPlanner<'a> {
    store: &'a dyn TemplateStore,
    layout: &'a OutputLayout,
    render: &'a RenderSettings,
}

impl<'a> ArtifactPlanner<'a> {
    /// Planner over a template store and output settings
    #[must_use]
    pub fn new(
        store: &'a dyn TemplateStore,
        layout: &'a OutputLayout,
        render: &'a RenderSettings,
    ) -> Self {
        Self {
            store,
            layout,
            render,
        }
    }

    /// Plan every file for `primary` and its relations
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] if a template cannot be loaded, or
    /// [`ScaffoldError::Configuration`] if two files would share a path.
    pub fn plan(
        &self,
        primary: &ClassifiedTable,
        relations: &[RelationPlan<'_>],
        naming: &OutputNaming,
    ) -> Result<GeneratedArtifact> {
        let mut artifact = GeneratedArtifact::default();

        for file in self.generate_models(primary, relations)? {
            artifact.push(file)?;
        }
        artifact.push(self.generate_controller(primary, relations, naming)?)?;
        artifact.push(self.generate_index_view(naming)?)?;
        artifact.push(self.generate_form_view(primary, naming, FormPage::Add)?)?;
        artifact.push(self.generate_form_view(primary, naming, FormPage::Edit)?)?;
        artifact.push(self.generate_script(primary, relations, naming)?)?;

        tracing::debug!(table = %primary.table.name, files = artifact.len(), "artifact planned");
        Ok(artifact)
    }

    fn generate_models(
        &self,
        primary: &ClassifiedTable,
        relations: &[RelationPlan<'_>],
    ) -> Result<Vec<GeneratedFile>> {
        let relation_list = relations
            .iter()
            .map(|plan| {
                let relation = plan.relation;
                let bindings = Bindings::new()
                    .with("relationMethod", relation.accessor())
                    .with("relationModel", self.layout.model_reference(&relation.model_name))
                    .with("foreignKey", &relation.foreign_key)
                    .with("primaryKey", &relation.primary_key);
                render(self.store, TemplateId::ModelRelation, &bindings)
                    .map(|text| text.trim_end().to_string())
            })
            .collect::<Result<Vec<_>>>()?
            .join("\n\n    ");

        let mut files = vec![self.generate_model(
            &NamingTransformer::model_name(&primary.table.name),
            primary,
            &relation_list,
        )?];

        for plan in relations {
            files.push(self.generate_model(&plan.relation.model_name, &plan.columns, "")?);
        }

        Ok(files)
    }

    fn generate_model(
        &self,
        model_name: &str,
        table: &ClassifiedTable,
        relation_list: &str,
    ) -> Result<GeneratedFile> {
        let delete_time = table
            .soft_delete
            .as_ref()
            .map_or_else(|| "false".to_string(), |column| format!("\"{column}\""));

        let bindings = Bindings::new()
            .with("modelNamespace", &self.layout.model_namespace)
            .with("modelName", model_name)
            .with("table", &table.table.name)
            .with("deleteTime", delete_time)
            .with("relationList", relation_list);

        Ok(GeneratedFile {
            path: self.layout.model_path(model_name),
            content: render(self.store, TemplateId::Model, &bindings)?,
            kind: ArtifactKind::Model,
            description: format!("Data model for `{}`", table.table.name),
        })
    }

    fn generate_controller(
        &self,
        primary: &ClassifiedTable,
        relations: &[RelationPlan<'_>],
        naming: &OutputNaming,
    ) -> Result<GeneratedFile> {
        let index_method = if relations.is_empty() {
            String::new()
        } else {
            let joins = relations
                .iter()
                .map(|plan| format!("->withJoin('{}', 'LEFT')", plan.relation.accessor()))
                .collect::<Vec<_>>()
                .join(format!("\n{}", self.render.join_indent).as_str());
            let bindings = Bindings::new().with("relationIndexMethod", joins);
            render(self.store, TemplateId::ControllerIndexMethod, &bindings)?
                .trim_end()
                .to_string()
        };

        let model_name = NamingTransformer::model_name(&primary.table.name);
        let bindings = Bindings::new()
            .with("controllerNamespace", self.layout.controller_namespace(naming))
            .with("controllerName", naming.controller_class())
            .with("controllerAnnotation", &primary.table.comment)
            .with("modelReference", self.layout.model_reference(&model_name))
            .with("indexMethod", index_method);

        Ok(GeneratedFile {
            path: self.layout.controller_path(naming),
            content: render(self.store, TemplateId::Controller, &bindings)?,
            kind: ArtifactKind::Controller,
            description: format!("Request handler for `{}`", naming.url),
        })
    }

    fn generate_index_view(&self, naming: &OutputNaming) -> Result<GeneratedFile> {
        let bindings = Bindings::new().with("controllerUrl", &naming.url);

        Ok(GeneratedFile {
            path: self.layout.view_path(naming, "index"),
            content: render(self.store, TemplateId::ViewIndex, &bindings)?,
            kind: ArtifactKind::IndexView,
            description: format!("List view for `{}`", naming.url),
        })
    }

    fn generate_form_view(
        &self,
        primary: &ClassifiedTable,
        naming: &OutputNaming,
        page: FormPage,
    ) -> Result<GeneratedFile> {
        let form_list = primary
            .table
            .columns
            .values()
            .filter(|column| !self.render.immutable_fields.contains(&column.name))
            .map(|column| self.render_field(column, page))
            .collect::<Result<Vec<_>>>()?
            .join(format!("\n{}", self.render.field_indent).as_str());

        let bindings = Bindings::new().with("formList", form_list);

        Ok(GeneratedFile {
            path: self.layout.view_path(naming, page.name()),
            content: render(self.store, TemplateId::ViewForm, &bindings)?,
            kind: page.kind(),
            description: format!("{} view for `{}`", page.title(), naming.url),
        })
    }

    fn render_field(&self, column: &Column, page: FormPage) -> Result<String> {
        let module = if self.render.textarea_fields.contains(&column.name) {
            FormModule::Textarea
        } else {
            FormModule::for_form_type(column.form_type())
        };

        let required = if column.required {
            self.render.required_marker.as_str()
        } else {
            ""
        };

        let value = match page {
            FormPage::Add => column.default_value.clone().unwrap_or_default(),
            FormPage::Edit => substitute(
                &self.render.edit_value,
                &Bindings::new().with("field", &column.name),
            ),
        };

        let bindings = Bindings::new()
            .with("comment", &column.comment)
            .with("field", &column.name)
            .with("required", required)
            .with("value", value);

        Ok(render(self.store, TemplateId::Module(module), &bindings)?
            .trim_end()
            .to_string())
    }

    fn generate_script(
        &self,
        primary: &ClassifiedTable,
        relations: &[RelationPlan<'_>],
        naming: &OutputNaming,
    ) -> Result<GeneratedFile> {
        let mut rows = vec!["{type: 'checkbox'},".to_string()];
        rows.extend(primary.table.columns.values().map(column_descriptor));
        for plan in relations {
            rows.extend(plan.columns.table.columns.values().map(column_descriptor));
        }
        rows.push(format!(
            "{{width: 250, title: '{}', templet: ea.table.tool}},",
            escape_js(&self.render.action_title)
        ));

        let bindings = Bindings::new()
            .with("controllerUrl", &naming.url)
            .with("indexCols", rows.join(format!("\n{}", self.render.column_indent).as_str()));

        Ok(GeneratedFile {
            path: self.layout.script_path(naming),
            content: render(self.store, TemplateId::Script, &bindings)?,
            kind: ArtifactKind::Script,
            description: format!("Table script for `{}`", naming.url),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum FormPage {
    Add,
    Edit,
}

impl FormPage {
    const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Add => "Create",
            Self::Edit => "Edit",
        }
    }

    const fn kind(self) -> ArtifactKind {
        match self {
            Self::Add => ArtifactKind::AddView,
            Self::Edit => ArtifactKind::EditView,
        }
    }
}

fn column_descriptor(column: &Column) -> String {
    format!(
        "{{field: '{}', title: '{}'}},",
        escape_js(&column.name),
        escape_js(&column.comment)
    )
}

fn escape_js(text: &str) -> String {
    text.replace('\\', r"\\").replace('\'', r"\'")
}
