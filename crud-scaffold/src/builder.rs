//! Scaffold build lifecycle
//!
//! A [`ScaffoldBuilder`] owns one build: the selected table, its relations,
//! the output naming and the current plan.
//!
//! ```text
//! Configured --plan()--> Planned --commit()--> Committed
//!                                 \-discard()-> Deleted
//! ```
//!
//! Any configuration change drops the plan and returns the build to
//! `Configured`.

use crate::classify::{ClassificationContext, ClassifiedTable, Classifier};
use crate::config::ScaffoldSettings;
use crate::error::{LookupError, Result, ScaffoldError};
use crate::naming::OutputNaming;
use crate::plan::{ArtifactPlanner, GeneratedArtifact, RelationPlan};
use crate::relation::{Relation, RelationOptions, RelationSet};
use crate::schema::{SchemaIntrospector, Table};
use crate::sink::FileSink;
use crate::template::TemplateStore;
use serde::Serialize;
use std::path::PathBuf;

/// Where a build is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildState {
    /// Configuration changed since the last plan
    Configured,
    /// A plan is available
    Planned,
    /// The plan was written
    Committed,
    /// The planned files were removed
    Deleted,
}

/// Facade over one scaffold build
///
/// # Examples
///
/// ```rust,no_run
/// use crud_scaffold::builder::ScaffoldBuilder;
/// use crud_scaffold::config::ScaffoldSettings;
/// use crud_scaffold::relation::RelationOptions;
/// use crud_scaffold::schema::{SchemaFile, StaticIntrospector};
/// use crud_scaffold::sink::LocalFileSink;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = SchemaFile::load(Path::new("schema.toml"))?;
/// let mut builder = ScaffoldBuilder::new(
///     Box::new(StaticIntrospector::new(schema)),
///     ScaffoldSettings::load()?,
/// );
///
/// builder.select_table("mall_goods")?;
/// builder.add_relation("mall_cate", "cate_id", RelationOptions::default())?;
/// let written = builder.commit(&LocalFileSink)?;
/// println!("{} files written", written.len());
/// # Ok(())
/// # }
/// ```
pub struct ScaffoldBuilder {
    introspector: Box<dyn SchemaIntrospector>,
    store: Box<dyn TemplateStore>,
    settings: ScaffoldSettings,
    table: Option<Table>,
    naming: Option<OutputNaming>,
    naming_overridden: bool,
    relations: RelationSet,
    force: bool,
    delete: bool,
    plan: Option<GeneratedArtifact>,
    state: BuildState,
}

impl ScaffoldBuilder {
    /// New build using the template store named by `settings`
    #[must_use]
    pub fn new(introspector: Box<dyn SchemaIntrospector>, settings: ScaffoldSettings) -> Self {
        let store = settings.templates.store();
        Self {
            introspector,
            store,
            settings,
            table: None,
            naming: None,
            naming_overridden: false,
            relations: RelationSet::default(),
            force: false,
            delete: false,
            plan: None,
            state: BuildState::Configured,
        }
    }

    /// Replace the template store
    #[must_use]
    pub fn with_template_store(mut self, store: Box<dyn TemplateStore>) -> Self {
        self.store = store;
        self.invalidate();
        self
    }

    /// Introspect `name` and make it the primary table
    ///
    /// Previously declared relations are dropped. The default output naming
    /// is derived from `name` unless it was overridden.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if the table does not exist, or
    /// [`ScaffoldError::ExternalLookup`] if the catalog cannot be queried.
    pub fn select_table(&mut self, name: &str) -> Result<&Table> {
        let physical = format!("{}{name}", self.settings.database.table_prefix);

        let raw = self.introspector.list_columns(&physical).map_err(|source| match source {
            LookupError::TableNotFound(_) => {
                ScaffoldError::Configuration(format!("table `{physical}` does not exist"))
            }
            source => ScaffoldError::ExternalLookup {
                table: physical.clone(),
                source,
            },
        })?;
        let comment = self
            .introspector
            .table_comment(&physical)
            .map_err(|source| ScaffoldError::ExternalLookup {
                table: physical.clone(),
                source,
            })?;

        let table = Table::new(name, comment, raw);
        tracing::info!(table = %physical, columns = table.columns.len(), "table selected");

        if !self.naming_overridden {
            self.naming = Some(OutputNaming::from_table(name));
        }
        self.relations = RelationSet::default();
        self.invalidate();

        Ok(self.table.insert(table))
    }

    /// Declare a relation from the primary table to `related_table`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if no table is selected or
    /// `foreign_key` is not one of its columns; the relation set and any
    /// current plan are left unchanged. See [`RelationSet::resolve`] for
    /// lookup failures.
    pub fn add_relation(
        &mut self,
        related_table: &str,
        foreign_key: &str,
        options: RelationOptions,
    ) -> Result<&Relation> {
        let table = self.table.as_ref().ok_or_else(no_table)?;

        let relation = self.relations.resolve(
            self.introspector.as_ref(),
            &self.settings.database.table_prefix,
            table,
            related_table,
            foreign_key,
            options,
        )?;

        self.plan = None;
        self.state = BuildState::Configured;
        Ok(relation)
    }

    /// Derive the output naming from an explicit controller path
    /// (`mall/GoodsCate`) instead of the table name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if `path` has no segments.
    pub fn override_output_naming(&mut self, path: &str) -> Result<&OutputNaming> {
        let naming = OutputNaming::from_controller_path(path);
        if naming.controller.is_empty() {
            return Err(ScaffoldError::Configuration(format!(
                "controller path `{path}` is empty"
            )));
        }

        tracing::debug!(controller = %naming.controller_path(), url = %naming.url, "output naming overridden");
        self.naming_overridden = true;
        self.invalidate();
        Ok(self.naming.insert(naming))
    }

    /// Overwrite existing files on commit instead of failing
    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    /// Mark this build as a delete run
    pub fn set_delete(&mut self, delete: bool) {
        self.delete = delete;
    }

    /// Whether this build is a delete run
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        self.delete
    }

    /// Whether commits overwrite existing files
    #[must_use]
    pub const fn is_force(&self) -> bool {
        self.force
    }

    /// Classify the primary table with the current relations
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if no table is selected.
    pub fn classified(&self) -> Result<ClassifiedTable> {
        let table = self.table.as_ref().ok_or_else(no_table)?;
        let settings = &self.settings.classifier;
        let context = ClassificationContext::for_table(table, settings, self.relations.foreign_keys());
        Ok(Classifier::new(settings).classify_table(table, &context))
    }

    /// Classify every table and bind the result to the template set
    ///
    /// Always recomputes from the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if no table is selected or two
    /// files would share a path, or [`ScaffoldError::Template`] if a template
    /// cannot be loaded.
    pub fn plan(&mut self) -> Result<&GeneratedArtifact> {
        let artifact = self.build_artifact()?;
        self.state = BuildState::Planned;
        Ok(self.plan.insert(artifact))
    }

    fn build_artifact(&self) -> Result<GeneratedArtifact> {
        let naming = self.naming.as_ref().ok_or_else(no_table)?;
        let primary = self.classified()?;

        let settings = &self.settings.classifier;
        let classifier = Classifier::new(settings);
        let relations: Vec<RelationPlan<'_>> = self
            .relations
            .iter()
            .map(|relation| {
                let context = ClassificationContext::for_table(
                    &relation.columns,
                    settings,
                    std::iter::empty::<String>(),
                );
                RelationPlan {
                    relation,
                    columns: classifier.classify_table(&relation.columns, &context),
                }
            })
            .collect();

        ArtifactPlanner::new(self.store.as_ref(), &self.settings.layout, &self.settings.render)
            .plan(&primary, &relations, naming)
    }

    /// Write every planned file, planning first if needed
    ///
    /// Unless `force` is set, every target is checked before anything is
    /// written and the commit is refused if any of them exists.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::Conflict`] listing every existing target; nothing is written.
    /// - [`ScaffoldError::PartialWrite`] if a write fails part way, carrying
    ///   the files already written. They are not rolled back.
    /// - Any error from [`Self::plan`].
    pub fn commit(&mut self, sink: &dyn FileSink) -> Result<Vec<PathBuf>> {
        self.ensure_planned()?;
        let artifact = self.plan.as_ref().ok_or_else(no_table)?;

        if !self.force {
            let conflicts: Vec<PathBuf> = artifact
                .paths()
                .filter(|path| sink.exists(path))
                .map(PathBuf::from)
                .collect();
            if !conflicts.is_empty() {
                tracing::warn!(count = conflicts.len(), "planned files already exist");
                return Err(ScaffoldError::Conflict { paths: conflicts });
            }
        }

        let mut written = Vec::with_capacity(artifact.len());
        for file in artifact.files() {
            let partial = |written: &[PathBuf], source| ScaffoldError::PartialWrite {
                written: written.to_vec(),
                path: file.path.clone(),
                source,
            };

            if let Some(parent) = file.path.parent() {
                sink.ensure_dir(parent).map_err(|e| partial(&written, e))?;
            }
            sink.write(&file.path, &file.content)
                .map_err(|e| partial(&written, e))?;

            tracing::info!(path = %file.path.display(), kind = %file.kind, "file written");
            written.push(file.path.clone());
        }

        self.state = BuildState::Committed;
        Ok(written)
    }

    /// Delete every planned file that exists, planning first if needed
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::Delete`] if a removal fails, carrying the files
    ///   already deleted.
    /// - Any error from [`Self::plan`].
    pub fn discard(&mut self, sink: &dyn FileSink) -> Result<Vec<PathBuf>> {
        self.ensure_planned()?;
        let artifact = self.plan.as_ref().ok_or_else(no_table)?;

        let mut deleted = Vec::new();
        for path in artifact.paths().filter(|path| sink.exists(path)) {
            sink.delete(path).map_err(|source| ScaffoldError::Delete {
                deleted: deleted.clone(),
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "file deleted");
            deleted.push(path.to_path_buf());
        }

        self.state = BuildState::Deleted;
        Ok(deleted)
    }

    fn ensure_planned(&mut self) -> Result<()> {
        if self.plan.is_none() {
            self.plan()?;
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.plan = None;
        self.state = BuildState::Configured;
    }

    /// Selected primary table
    #[must_use]
    pub const fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Declared relations
    #[must_use]
    pub const fn relations(&self) -> &RelationSet {
        &self.relations
    }

    /// Current output naming
    #[must_use]
    pub const fn naming(&self) -> Option<&OutputNaming> {
        self.naming.as_ref()
    }

    /// Current plan, if one is up to date
    #[must_use]
    pub const fn planned(&self) -> Option<&GeneratedArtifact> {
        self.plan.as_ref()
    }

    /// Lifecycle state
    #[must_use]
    pub const fn state(&self) -> BuildState {
        self.state
    }

    /// Settings this build runs with
    #[must_use]
    pub const fn settings(&self) -> &ScaffoldSettings {
        &self.settings
    }
}

fn no_table() -> ScaffoldError {
    ScaffoldError::Configuration("no table selected".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MatchMode;
    use crate::plan::ArtifactKind;
    use crate::schema::{RawColumn, StaticIntrospector, TableSpec};
    use crate::sink::{LocalFileSink, MockFileSink};
    use std::fs;
    use std::io;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn column(name: &str, nullable: bool) -> RawColumn {
        RawColumn {
            name: name.to_string(),
            raw_type: "varchar(255)".to_string(),
            comment: String::new(),
            nullable,
            default: None,
        }
    }

    fn table(comment: &str, names: &[&str]) -> TableSpec {
        TableSpec {
            comment: comment.to_string(),
            primary_key: Some("id".to_string()),
            columns: names.iter().map(|n| column(n, false)).collect(),
        }
    }

    fn introspector() -> StaticIntrospector {
        StaticIntrospector::default()
            .with_table(
                "t_article",
                table(
                    "Articles",
                    &["id", "title", "cover_image", "content", "sort", "create_time", "update_time"],
                ),
            )
            .with_table("t_goods", table("Goods", &["id", "cate_id", "title", "delete_time"]))
            .with_table("t_category", table("Categories", &["id", "name", "update_time"]))
    }

    fn builder(root: &TempDir) -> ScaffoldBuilder {
        let mut settings = ScaffoldSettings::default();
        settings.layout.root = root.path().to_path_buf();
        ScaffoldBuilder::new(Box::new(introspector()), settings)
    }

    fn view(builder: &mut ScaffoldBuilder, kind: ArtifactKind) -> String {
        builder
            .plan()
            .unwrap()
            .of_kind(kind)
            .next()
            .unwrap()
            .content
            .clone()
    }

    struct OfflineCatalog;

    impl SchemaIntrospector for OfflineCatalog {
        fn list_columns(&self, _table: &str) -> std::result::Result<Vec<RawColumn>, LookupError> {
            Err(LookupError::Schema("catalog offline".to_string()))
        }

        fn table_comment(&self, _table: &str) -> std::result::Result<String, LookupError> {
            Err(LookupError::Schema("catalog offline".to_string()))
        }

        fn primary_key(&self, _table: &str) -> std::result::Result<Option<String>, LookupError> {
            Err(LookupError::Schema("catalog offline".to_string()))
        }
    }

    #[test]
    fn test_article_create_view() {
        let root = tempdir().unwrap();
        let mut settings = ScaffoldSettings::default();
        settings.layout.root = root.path().to_path_buf();
        settings.classifier.match_mode = MatchMode::Suffix;
        let mut builder = ScaffoldBuilder::new(Box::new(introspector()), settings);
        builder.select_table("t_article").unwrap();

        let add = view(&mut builder, ArtifactKind::AddView);
        assert_eq!(add.matches(r#"<label class="layui-form-label">"#).count(), 4);
        assert!(add.contains(r#"<input type="text" name="title""#));
        assert!(add.contains(r#"data-upload="cover_image" data-upload-number="one""#));
        assert!(add.contains(r#"<textarea name="content" rows="20" class="layui-textarea editor""#));
        assert!(add.contains(r#"<input type="number" name="sort""#));
        assert!(!add.contains(r#"name="id""#));
        assert!(!add.contains(r#"name="create_time""#));

        for file in builder.planned().unwrap().files() {
            assert!(!file.content.contains("update_time"), "{} mentions update_time", file.path.display());
        }
    }

    #[test]
    fn test_select_missing_table() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        let err = builder.select_table("t_missing").unwrap_err();
        assert!(matches!(err, ScaffoldError::Configuration(_)));
        assert!(builder.table().is_none());
    }

    #[test]
    fn test_default_mode_keeps_cover_image_as_input() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let add = view(&mut builder, ArtifactKind::AddView);
        assert!(add.contains(r#"<input type="text" name="cover_image""#));
        assert!(!add.contains(r#"data-upload="cover_image""#));
    }

    #[test]
    fn test_select_catalog_failure() {
        let mut builder = ScaffoldBuilder::new(Box::new(OfflineCatalog), ScaffoldSettings::default());
        let err = builder.select_table("article").unwrap_err();

        match err {
            ScaffoldError::ExternalLookup { table, source } => {
                assert_eq!(table, "article");
                assert!(matches!(source, LookupError::Schema(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(builder.table().is_none());
    }

    #[test]
    fn test_table_prefix_applies_to_lookups_only() {
        let root = tempdir().unwrap();
        let mut settings = ScaffoldSettings::default();
        settings.layout.root = root.path().to_path_buf();
        settings.database.table_prefix = "t_".to_string();
        let mut builder = ScaffoldBuilder::new(Box::new(introspector()), settings);

        builder.select_table("goods").unwrap();
        builder.add_relation("category", "cate_id", RelationOptions::default()).unwrap();
        assert_eq!(builder.naming().unwrap().url, "goods");

        let artifact = builder.plan().unwrap();
        let model = artifact
            .get(&root.path().join("app/admin/model/Goods.php"))
            .unwrap();
        assert!(model.content.contains(r#"protected $name = "goods";"#));
        assert!(model.content.contains(r#"protected $deleteTime = "delete_time";"#));
        assert!(artifact.get(&root.path().join("app/admin/model/Category.php")).is_some());
    }

    #[test]
    fn test_bad_foreign_key() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let err = builder
            .add_relation("t_category", "nonexistent_col", RelationOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Configuration(_)));
        assert!(builder.relations().is_empty());
    }

    #[test]
    fn test_rejected_relation_keeps_plan() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_goods").unwrap();
        let planned = builder.plan().unwrap().clone();

        builder
            .add_relation("t_category", "nonexistent_col", RelationOptions::default())
            .unwrap_err();
        assert_eq!(builder.state(), BuildState::Planned);
        assert_eq!(builder.planned(), Some(&planned));

        builder
            .add_relation("t_category", "cate_id", RelationOptions::default())
            .unwrap();
        assert_eq!(builder.state(), BuildState::Configured);
        assert!(builder.planned().is_none());
    }

    #[test]
    fn test_relation_before_selection() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        let err = builder
            .add_relation("t_category", "cate_id", RelationOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Configuration(_)));
    }

    #[test]
    fn test_foreign_key_becomes_select() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_goods").unwrap();

        let before = view(&mut builder, ArtifactKind::AddView);
        assert!(!before.contains(r#"<select name="cate_id""#));
        assert_ne!(
            builder.classified().unwrap().table.columns["cate_id"].form_type(),
            crate::classify::FormType::Select
        );

        builder
            .add_relation("t_category", "cate_id", RelationOptions::default())
            .unwrap();
        assert_eq!(builder.state(), BuildState::Configured);

        let after = view(&mut builder, ArtifactKind::AddView);
        assert!(after.contains(r#"<select name="cate_id""#));

        let script = view(&mut builder, ArtifactKind::Script);
        assert!(script.contains("{field: 'name', title: 'name'},"));
        assert!(!script.contains("update_time"));
    }

    #[test]
    fn test_plan_is_idempotent() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let first = builder.plan().unwrap().clone();
        let second = builder.plan().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(builder.state(), BuildState::Planned);
    }

    #[test]
    fn test_plan_without_table() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        assert!(matches!(builder.plan().unwrap_err(), ScaffoldError::Configuration(_)));
    }

    #[test]
    fn test_override_output_naming() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();
        builder.override_output_naming("cms/NewsArticle").unwrap();

        let artifact = builder.plan().unwrap();
        assert!(artifact
            .get(&root.path().join("app/admin/controller/cms/NewsArticle.php"))
            .is_some());
        assert!(artifact
            .get(&root.path().join("app/admin/view/cms/news_article/index.html"))
            .is_some());
        assert!(artifact
            .get(&root.path().join("public/static/admin/js/cms/news_article.js"))
            .is_some());

        assert!(builder.override_output_naming("//").is_err());
    }

    #[test]
    fn test_commit_then_discard() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let written = builder.commit(&LocalFileSink).unwrap();
        assert_eq!(written.len(), 6);
        assert!(written.iter().all(|p| p.is_file()));
        assert_eq!(builder.state(), BuildState::Committed);

        let mut deleted = builder.discard(&LocalFileSink).unwrap();
        let mut expected = written.clone();
        deleted.sort();
        expected.sort();
        assert_eq!(deleted, expected);
        assert_eq!(builder.state(), BuildState::Deleted);

        assert!(builder.discard(&LocalFileSink).unwrap().is_empty());
    }

    #[test]
    fn test_commit_conflict_writes_nothing() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let script = builder.settings().layout.script_path(builder.naming().unwrap());
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, "existing").unwrap();

        let err = builder.commit(&LocalFileSink).unwrap_err();
        match err {
            ScaffoldError::Conflict { paths } => assert_eq!(paths, vec![script.clone()]),
            other => panic!("unexpected error: {other}"),
        }

        let others: Vec<_> = builder
            .planned()
            .unwrap()
            .paths()
            .filter(|p| *p != script.as_path())
            .map(Path::to_path_buf)
            .collect();
        assert!(others.iter().all(|p| !p.exists()));
        assert_eq!(fs::read_to_string(&script).unwrap(), "existing");

        builder.set_force(true);
        let written = builder.commit(&LocalFileSink).unwrap();
        assert_eq!(written.len(), 6);
        assert_ne!(fs::read_to_string(&script).unwrap(), "existing");
    }

    #[test]
    fn test_partial_write_reports_written_paths() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let mut sink = MockFileSink::new();
        sink.expect_exists().returning(|_| false);
        sink.expect_ensure_dir().returning(|_| Ok(()));
        let mut calls = 0;
        sink.expect_write().returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(())
            } else {
                Err(io::Error::other("disk full"))
            }
        });

        let err = builder.commit(&sink).unwrap_err();
        match err {
            ScaffoldError::PartialWrite { written, path, .. } => {
                assert_eq!(written.len(), 1);
                assert_ne!(written[0], path);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(builder.state(), BuildState::Planned);
    }

    #[test]
    fn test_discard_skips_missing_files() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let mut sink = MockFileSink::new();
        sink.expect_exists().returning(|path| path.extension().is_some_and(|e| e == "js"));
        sink.expect_delete().times(1).returning(|_| Ok(()));

        let deleted = builder.discard(&sink).unwrap();
        assert_eq!(deleted.len(), 1);
        assert!(deleted[0].to_string_lossy().ends_with("t/article.js"));
    }

    #[test]
    fn test_delete_failure_reports_progress() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.select_table("t_article").unwrap();

        let mut sink = MockFileSink::new();
        sink.expect_exists().returning(|_| true);
        sink.expect_delete()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let err = builder.discard(&sink).unwrap_err();
        assert!(matches!(err, ScaffoldError::Delete { ref deleted, .. } if deleted.is_empty()));
    }

    #[test]
    fn test_flags() {
        let root = tempdir().unwrap();
        let mut builder = builder(&root);
        builder.set_delete(true);
        builder.set_force(true);
        assert!(builder.is_delete());
        assert!(builder.is_force());
    }
}
