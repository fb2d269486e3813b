//! Column classification
//!
//! Every column is assigned a [`FormType`] by evaluating an ordered rule list,
//! first match wins. Rules are data, not code: the default list can be
//! replaced wholesale from the `[classifier]` settings section.
//!
//! # Default Rules
//!
//! | # | Match | Form type |
//! |---|-------|-----------|
//! | 1 | name is `sort` | `sort` |
//! | 2 | name is `describe`, `content` or `details` | `editor` |
//! | 3 | token `images`, `photos`, `icons` | `images` |
//! | 4 | token `image`, `photo`, `icon` | `image` |
//! | 5 | token `files` | `files` |
//! | 6 | token `file` | `file` |
//! | 7 | token `time`, `date` | `date` |
//! | 8 | name is `status` | `switch` |
//! | 9 | name in the accumulated editor set | `editor` |
//! | 10 | name in the accumulated sort set | `sort` |
//! | 11 | name is a relation foreign key | `select` |
//! | - | anything else | `text` |
//!
//! Token rules compare according to [`MatchMode`].

use crate::schema::Table;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic form category of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    /// Single-line input
    #[default]
    Text,
    /// Single image upload
    Image,
    /// Multiple image upload
    Images,
    /// Single file upload
    File,
    /// Multiple file upload
    Files,
    /// Date/time picker
    Date,
    /// On/off switch
    Switch,
    /// Rich-text editor
    Editor,
    /// Sort weight
    Sort,
    /// Select box fed by a relation
    Select,
}

impl FormType {
    /// Lower-case identifier used in settings and template ids
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Images => "images",
            Self::File => "file",
            Self::Files => "files",
            Self::Date => "date",
            Self::Switch => "switch",
            Self::Editor => "editor",
            Self::Sort => "sort",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How token rules compare a column name against a token
///
/// `prefix` is the default and the literal rule: `image_path` matches `image`
/// but `cover_image` does not. `suffix` and `affix` are opt-in and catch
/// names such as `profile` (`file`) or `candidate` (`date`) as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Name starts with the token
    #[default]
    Prefix,
    /// Name ends with the token
    Suffix,
    /// Name starts or ends with the token
    Affix,
}

impl MatchMode {
    /// Whether `name` matches `token` under this mode
    #[must_use]
    pub fn matches(self, name: &str, token: &str) -> bool {
        match self {
            Self::Prefix => name.starts_with(token),
            Self::Suffix => name.ends_with(token),
            Self::Affix => name.starts_with(token) || name.ends_with(token),
        }
    }
}

/// Column-name set accumulated during a classification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSet {
    /// Sort columns of the primary table
    Sort,
    /// Rich-text columns of the primary table
    Editor,
    /// Foreign keys registered by relations
    Select,
}

/// One classification rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "lowercase")]
pub enum Rule {
    /// Column name equals one of `names`
    Exact {
        /// Candidate names
        names: Vec<String>,
        /// Resulting form type
        form_type: FormType,
    },
    /// Column name matches one of `tokens` under the configured [`MatchMode`]
    Token {
        /// Candidate tokens
        tokens: Vec<String>,
        /// Resulting form type
        form_type: FormType,
    },
    /// Column name is in an accumulated context set
    Context {
        /// Set to consult
        set: ContextSet,
        /// Resulting form type
        form_type: FormType,
    },
}

impl Rule {
    fn exact(names: &[&str], form_type: FormType) -> Self {
        Self::Exact {
            names: names.iter().map(ToString::to_string).collect(),
            form_type,
        }
    }

    fn token(tokens: &[&str], form_type: FormType) -> Self {
        Self::Token {
            tokens: tokens.iter().map(ToString::to_string).collect(),
            form_type,
        }
    }

    /// Form type produced when this rule matches
    #[must_use]
    pub const fn form_type(&self) -> FormType {
        match self {
            Self::Exact { form_type, .. }
            | Self::Token { form_type, .. }
            | Self::Context { form_type, .. } => *form_type,
        }
    }

    fn matches(&self, name: &str, mode: MatchMode, context: &ClassificationContext) -> bool {
        match self {
            Self::Exact { names, .. } => names.iter().any(|n| n == name),
            Self::Token { tokens, .. } => tokens.iter().any(|t| mode.matches(name, t)),
            Self::Context { set, .. } => context.set(*set).contains(name),
        }
    }
}

/// Classifier settings (`[classifier]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Token comparison mode
    pub match_mode: MatchMode,
    /// Columns removed before classification and rendering
    pub ignore: Vec<String>,
    /// Names collected into the sort context set
    pub sort_names: Vec<String>,
    /// Names collected into the editor context set
    pub editor_names: Vec<String>,
    /// Column whose presence marks a table as soft-deleting
    pub soft_delete_column: String,
    /// Ordered rules, first match wins
    pub rules: Vec<Rule>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            ignore: vec!["update_time".to_string(), "delete_time".to_string()],
            sort_names: vec!["sort".to_string()],
            editor_names: vec![
                "describe".to_string(),
                "content".to_string(),
                "details".to_string(),
            ],
            soft_delete_column: "delete_time".to_string(),
            rules: default_rules(),
        }
    }
}

/// Built-in rule list
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::exact(&["sort"], FormType::Sort),
        Rule::exact(&["describe", "content", "details"], FormType::Editor),
        Rule::token(&["images", "photos", "icons"], FormType::Images),
        Rule::token(&["image", "photo", "icon"], FormType::Image),
        Rule::token(&["files"], FormType::Files),
        Rule::token(&["file"], FormType::File),
        Rule::token(&["time", "date"], FormType::Date),
        Rule::exact(&["status"], FormType::Switch),
        Rule::Context {
            set: ContextSet::Editor,
            form_type: FormType::Editor,
        },
        Rule::Context {
            set: ContextSet::Sort,
            form_type: FormType::Sort,
        },
        Rule::Context {
            set: ContextSet::Select,
            form_type: FormType::Select,
        },
    ]
}

/// Name sets consulted by context rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationContext {
    /// Sort columns
    pub sort: IndexSet<String>,
    /// Rich-text columns
    pub editor: IndexSet<String>,
    /// Select-driving foreign keys
    pub select: IndexSet<String>,
}

impl ClassificationContext {
    /// Collect the sort and editor sets from the primary table and take the
    /// select set from registered foreign keys
    #[must_use]
    pub fn for_table<I, S>(table: &Table, settings: &ClassifierSettings, foreign_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collect = |names: &[String]| -> IndexSet<String> {
            table
                .columns
                .keys()
                .filter(|name| names.contains(name))
                .cloned()
                .collect()
        };

        Self {
            sort: collect(&settings.sort_names),
            editor: collect(&settings.editor_names),
            select: foreign_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Borrow one of the sets
    #[must_use]
    pub const fn set(&self, set: ContextSet) -> &IndexSet<String> {
        match set {
            ContextSet::Sort => &self.sort,
            ContextSet::Editor => &self.editor,
            ContextSet::Select => &self.select,
        }
    }
}

/// Rule evaluator
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    settings: &'a ClassifierSettings,
}

impl<'a> Classifier<'a> {
    /// Classifier over the given settings
    #[must_use]
    pub const fn new(settings: &'a ClassifierSettings) -> Self {
        Self { settings }
    }

    /// Form type of a single column name
    #[must_use]
    pub fn classify(&self, name: &str, context: &ClassificationContext) -> FormType {
        self.settings
            .rules
            .iter()
            .find(|rule| rule.matches(name, self.settings.match_mode, context))
            .map_or(FormType::Text, Rule::form_type)
    }

    /// Whether `name` is in the ignore set
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.settings.ignore.iter().any(|i| i == name)
    }

    /// Drop ignored columns and assign a form type to every remaining column
    #[must_use]
    pub fn classify_table(&self, table: &Table, context: &ClassificationContext) -> ClassifiedTable {
        let soft_delete = table
            .has_column(&self.settings.soft_delete_column)
            .then(|| self.settings.soft_delete_column.clone());

        let mut classified = table.without(self.settings.ignore.as_slice());
        for column in classified.columns.values_mut() {
            let form_type = self.classify(&column.name, context);
            tracing::debug!(table = %table.name, column = %column.name, %form_type, "classified column");
            column.form_type = Some(form_type);
        }

        ClassifiedTable {
            table: classified,
            soft_delete,
        }
    }
}

/// A table after ignore filtering and classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedTable {
    /// Remaining columns, each with a form type
    pub table: Table,
    /// Soft-delete column, detected before ignored columns were dropped
    pub soft_delete: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawColumn;
    use proptest::prelude::*;

    fn table(names: &[&str]) -> Table {
        Table::new(
            "article",
            "",
            names
                .iter()
                .map(|n| RawColumn {
                    name: (*n).to_string(),
                    raw_type: "varchar(255)".to_string(),
                    comment: String::new(),
                    nullable: false,
                    default: None,
                })
                .collect(),
        )
    }

    fn classify(name: &str) -> FormType {
        let settings = ClassifierSettings::default();
        Classifier::new(&settings).classify(name, &ClassificationContext::default())
    }

    fn classify_with_mode(name: &str, match_mode: MatchMode) -> FormType {
        let settings = ClassifierSettings {
            match_mode,
            ..ClassifierSettings::default()
        };
        Classifier::new(&settings).classify(name, &ClassificationContext::default())
    }

    #[test]
    fn test_exact_name_rules() {
        assert_eq!(classify("sort"), FormType::Sort);
        assert_eq!(classify("content"), FormType::Editor);
        assert_eq!(classify("describe"), FormType::Editor);
        assert_eq!(classify("details"), FormType::Editor);
        assert_eq!(classify("status"), FormType::Switch);
        assert_eq!(classify("title"), FormType::Text);
    }

    #[test]
    fn test_image_tokens() {
        assert_eq!(classify("image"), FormType::Image);
        assert_eq!(classify("icon_x"), FormType::Image);
        assert_eq!(classify("photo"), FormType::Image);
        assert_eq!(classify("images"), FormType::Images);
        assert_eq!(classify("icons_x"), FormType::Images);
        assert_eq!(classify("photos"), FormType::Images);
    }

    #[test]
    fn test_file_and_date_tokens() {
        assert_eq!(classify("file"), FormType::File);
        assert_eq!(classify("file_url"), FormType::File);
        assert_eq!(classify("files"), FormType::Files);
        assert_eq!(classify("time_start"), FormType::Date);
        assert_eq!(classify("date"), FormType::Date);
    }

    #[test]
    fn test_prefix_mode_is_literal() {
        assert_eq!(classify_with_mode("image_path", MatchMode::Prefix), FormType::Image);
        assert_eq!(classify_with_mode("cover_image", MatchMode::Prefix), FormType::Text);
        assert_eq!(classify_with_mode("create_time", MatchMode::Prefix), FormType::Text);
    }

    #[test]
    fn test_default_mode_leaves_embedded_tokens_alone() {
        assert_eq!(ClassifierSettings::default().match_mode, MatchMode::Prefix);
        for name in ["profile", "candidate", "mandate", "lexicon", "cover_image", "update_date"] {
            assert_eq!(classify(name), FormType::Text, "{name}");
        }
    }

    #[test]
    fn test_suffix_mode() {
        assert_eq!(classify_with_mode("cover_image", MatchMode::Suffix), FormType::Image);
        assert_eq!(classify_with_mode("image_path", MatchMode::Suffix), FormType::Text);
        assert_eq!(classify_with_mode("gallery_photos", MatchMode::Suffix), FormType::Images);
    }

    #[test]
    fn test_affix_mode_matches_both_ends() {
        assert_eq!(classify_with_mode("cover_image", MatchMode::Affix), FormType::Image);
        assert_eq!(classify_with_mode("image_path", MatchMode::Affix), FormType::Image);
        assert_eq!(classify_with_mode("publish_time", MatchMode::Affix), FormType::Date);
        assert_eq!(classify_with_mode("profile", MatchMode::Affix), FormType::File);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // A reordered list lets the token rule shadow the exact one
        let settings = ClassifierSettings {
            rules: vec![
                Rule::token(&["so"], FormType::Image),
                Rule::exact(&["sort"], FormType::Sort),
            ],
            ..ClassifierSettings::default()
        };
        let ctx = ClassificationContext::default();
        assert_eq!(Classifier::new(&settings).classify("sort", &ctx), FormType::Image);
        assert_eq!(classify("sort"), FormType::Sort);
    }

    #[test]
    fn test_select_from_context() {
        let settings = ClassifierSettings::default();
        let t = table(&["id", "cate_id", "title"]);

        let before = ClassificationContext::for_table(&t, &settings, Vec::<String>::new());
        assert_eq!(Classifier::new(&settings).classify("cate_id", &before), FormType::Text);

        let after = ClassificationContext::for_table(&t, &settings, ["cate_id"]);
        assert_eq!(Classifier::new(&settings).classify("cate_id", &after), FormType::Select);
    }

    #[test]
    fn test_context_collects_sort_and_editor() {
        let settings = ClassifierSettings {
            sort_names: vec!["weight".to_string()],
            editor_names: vec!["body".to_string()],
            ..ClassifierSettings::default()
        };
        let t = table(&["id", "weight", "body", "title"]);
        let ctx = ClassificationContext::for_table(&t, &settings, Vec::<String>::new());
        assert!(ctx.sort.contains("weight"));
        assert!(ctx.editor.contains("body"));

        let classifier = Classifier::new(&settings);
        assert_eq!(classifier.classify("weight", &ctx), FormType::Sort);
        assert_eq!(classifier.classify("body", &ctx), FormType::Editor);
    }

    #[test]
    fn test_classify_table_drops_ignored() {
        let settings = ClassifierSettings::default();
        let t = table(&["id", "title", "update_time", "delete_time", "status"]);
        let ctx = ClassificationContext::for_table(&t, &settings, Vec::<String>::new());
        let classified = Classifier::new(&settings).classify_table(&t, &ctx);

        let names: Vec<_> = classified.table.columns.keys().cloned().collect();
        assert_eq!(names, vec!["id", "title", "status"]);
        assert!(classified.table.columns.values().all(|c| c.form_type.is_some()));
        assert_eq!(classified.table.columns["status"].form_type(), FormType::Switch);
        assert_eq!(classified.soft_delete.as_deref(), Some("delete_time"));
    }

    #[test]
    fn test_no_soft_delete_column() {
        let settings = ClassifierSettings::default();
        let t = table(&["id", "title"]);
        let ctx = ClassificationContext::default();
        assert_eq!(Classifier::new(&settings).classify_table(&t, &ctx).soft_delete, None);
    }

    #[test]
    fn test_rules_deserialize_from_toml() {
        let text = r#"
match_mode = "suffix"

[[rules]]
match = "exact"
names = ["avatar"]
form_type = "image"

[[rules]]
match = "context"
set = "select"
form_type = "select"
"#;
        let settings: ClassifierSettings = toml::from_str(text).unwrap();
        assert_eq!(settings.match_mode, MatchMode::Suffix);
        assert_eq!(settings.rules.len(), 2);
        assert_eq!(settings.ignore, vec!["update_time", "delete_time"]);

        let ctx = ClassificationContext::default();
        assert_eq!(Classifier::new(&settings).classify("avatar", &ctx), FormType::Image);
        assert_eq!(Classifier::new(&settings).classify("image", &ctx), FormType::Text);
    }

    proptest! {
        #[test]
        fn prop_singular_image_prefix(
            token in prop::sample::select(vec!["image", "photo", "icon"]),
            tail in "([a-rt-z_][a-z_]{0,8})?",
        ) {
            let name = format!("{token}{tail}");
            prop_assert_eq!(classify_with_mode(&name, MatchMode::Prefix), FormType::Image);
        }

        #[test]
        fn prop_plural_image_prefix(
            token in prop::sample::select(vec!["images", "photos", "icons"]),
            tail in "[a-z_]{0,8}",
        ) {
            let name = format!("{token}{tail}");
            prop_assert_eq!(classify_with_mode(&name, MatchMode::Prefix), FormType::Images);
        }
    }
}
