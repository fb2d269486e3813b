//! Naming conventions for generated artifacts
//!
//! Converts table names into model names, relation accessors and the
//! nested controller/view/script identifiers used to lay out output files.

use inflector::Inflector;
use serde::Serialize;

/// Case conversion helpers
pub struct NamingTransformer;

impl NamingTransformer {
    /// Put `_` before every ASCII uppercase letter and lower-case it
    ///
    /// Digits stay attached to the preceding word (`log2` stays `log2`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use crud_scaffold::naming::NamingTransformer;
    /// assert_eq!(NamingTransformer::hump_to_line("profileLog"), "profile_log");
    /// assert_eq!(NamingTransformer::hump_to_line("v2"), "v2");
    /// ```
    #[must_use]
    pub fn hump_to_line(input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 4);
        for c in input.chars() {
            if c.is_ascii_uppercase() {
                out.push('_');
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Convert string to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// # use crud_scaffold::naming::NamingTransformer;
    /// assert_eq!(NamingTransformer::to_camel_case("user_profile"), "userProfile");
    /// ```
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Upper-case the first character, leaving the rest untouched
    #[must_use]
    pub fn upper_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Lower-case the first character, leaving the rest untouched
    #[must_use]
    pub fn lower_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    /// Model class name for a table (`article_tag` → `ArticleTag`)
    #[must_use]
    pub fn model_name(table: &str) -> String {
        Self::upper_first(&Self::to_camel_case(table))
    }

    /// Relation accessor name for a related table (`article_tag` → `articleTag`)
    #[must_use]
    pub fn relation_accessor(table: &str) -> String {
        Self::to_camel_case(table)
    }
}

/// Output identifiers derived from a table name or an explicit controller path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputNaming {
    /// Controller path segments (`["user", "ProfileLog"]`)
    pub controller: Vec<String>,
    /// Routing identifier (`user.profile_log`)
    pub url: String,
    /// View directory segments (`["user", "profile_log"]`)
    pub view: Vec<String>,
    /// Script path segments, identical to the view segments
    pub script: Vec<String>,
}

impl OutputNaming {
    /// Derive the default naming from an unprefixed table name
    ///
    /// The first `_` segment becomes a directory, the remaining segments are
    /// joined into one `PascalCase` controller name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crud_scaffold::naming::OutputNaming;
    /// let naming = OutputNaming::from_table("user_profile_log");
    /// assert_eq!(naming.controller_path(), "user/ProfileLog");
    /// assert_eq!(naming.url, "user.profile_log");
    ///
    /// let naming = OutputNaming::from_table("article");
    /// assert_eq!(naming.controller_path(), "Article");
    /// ```
    #[must_use]
    pub fn from_table(table: &str) -> Self {
        let segments: Vec<&str> = table.split('_').filter(|s| !s.is_empty()).collect();

        let controller = match segments.as_slice() {
            [] => vec![NamingTransformer::upper_first(table)],
            [single] => vec![NamingTransformer::upper_first(single)],
            [first, rest @ ..] => {
                let tail: String = rest
                    .iter()
                    .map(|s| NamingTransformer::upper_first(s))
                    .collect();
                vec![(*first).to_string(), tail]
            }
        };

        Self::from_segments(controller)
    }

    /// Derive naming from an explicit controller path such as `mall/GoodsCate`
    ///
    /// Both `/` and `\` separate segments.
    #[must_use]
    pub fn from_controller_path(path: &str) -> Self {
        let controller = path
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self::from_segments(controller)
    }

    fn from_segments(controller: Vec<String>) -> Self {
        let view: Vec<String> = controller
            .iter()
            .map(|s| NamingTransformer::hump_to_line(&NamingTransformer::lower_first(s)))
            .collect();

        Self {
            url: view.join("."),
            script: view.clone(),
            view,
            controller,
        }
    }

    /// Controller path joined with `/`
    #[must_use]
    pub fn controller_path(&self) -> String {
        self.controller.join("/")
    }

    /// Controller class name (last path segment)
    #[must_use]
    pub fn controller_class(&self) -> &str {
        self.controller.last().map_or("", String::as_str)
    }

    /// Controller package segments (every segment but the last)
    #[must_use]
    pub fn controller_package(&self) -> &[String] {
        self.controller
            .split_last()
            .map_or(&[][..], |(_, package)| package)
    }
}
