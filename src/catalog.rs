//! The read-only catalog of command snippets.
//!
//! Entries are compiled into the binary and assembled into a [`Catalog`] once
//! per process. A catalog never changes after construction; producing an
//! updated set of entries yields a new catalog with a bumped version.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

/// Category assigned to entries whose label is missing.
pub const DEFAULT_CATEGORY: &str = "Other";

/// One command snippet in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    pub category: String,
    pub title: String,
    /// Literal invocation text. Never parsed or executed.
    pub command: String,
    /// May be empty.
    pub description: String,
    /// Preformatted example output shown in the detail view.
    pub example: Option<String>,
    pub documentation_link: String,
}

impl CommandEntry {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        command: impl Into<String>,
        documentation_link: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        };
        Self {
            id: id.into(),
            category,
            title: title.into(),
            command: command.into(),
            description: String::new(),
            example: None,
            documentation_link: documentation_link.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        let example = example.into();
        self.example = if example.is_empty() {
            None
        } else {
            Some(example)
        };
        self
    }
}

/// An immutable, versioned, ordered collection of entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: u32,
    entries: Arc<[CommandEntry]>,
}

static GLOBAL: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

impl Catalog {
    /// Build a catalog, keeping the first entry for each id.
    pub fn from_entries(version: u32, entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries: Vec<CommandEntry> = entries
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.id.clone());
                if !fresh {
                    tracing::warn!(id = %entry.id, title = %entry.title, "dropping duplicate catalog entry");
                }
                fresh
            })
            .collect();
        tracing::debug!(version, count = entries.len(), "catalog built");
        Self {
            version,
            entries: entries.into(),
        }
    }

    /// The compiled-in cheatsheet.
    pub fn builtin() -> Self {
        Self::from_entries(1, builtin_entries())
    }

    /// Process-wide catalog, built on first access.
    pub fn global() -> &'static Catalog {
        &GLOBAL
    }

    /// Produce a successor catalog holding `entries`. `self` is left as is.
    pub fn with_entries(&self, entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        Self::from_entries(self.version.saturating_add(1), entries)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get_all(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

const DRUSH_DOCS: &str = "https://www.drush.org/12.x/commands";

fn drush_docs(page: &str) -> String {
    format!("{DRUSH_DOCS}/{page}/")
}

fn builtin_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "drush-cache-rebuild",
            "Drush",
            "Clear Cache",
            "drush cache:rebuild;",
            drush_docs("cache_rebuild"),
        )
        .with_description("Clear/Rebuild all caches.")
        .with_example(
            "```\n\
             > drush cache:rebuild\n\
             > [success] Cache rebuild complete.\n\
             ```\n\
             ```\n\
             > drush cr\n\
             > [success] Cache rebuild complete.\n\
             ```",
        ),
        CommandEntry::new(
            "vendor-drush-cache-rebuild",
            "Other",
            "Clear Cache (using composer drush)",
            "vendor/bin/drush cache:rebuild;",
            drush_docs("cache_rebuild"),
        )
        .with_description("Use drush executable file sitting inside the composer directory.")
        .with_example(
            "```\n\
             > vendor/bin/drush cache:rebuild\n\
             > [success] Cache rebuild complete.\n\
             ```\n\
             ```\n\
             > vendor/bin/drush cr\n\
             > [success] Cache rebuild complete.\n\
             ```",
        ),
        CommandEntry::new(
            "drush-logging-verbose",
            "Drush",
            "Debug verbose",
            "drush config:set system.logging error_level verbose -y",
            drush_docs("config_set"),
        )
        .with_description("Set system debug level to verbose mode.")
        .with_example(
            "```\n\
             > drush config:set system.logging error_level verbose -y\n\
             > Do you want to update error_level key in system.logging config?\n\
             > yes.\n\
             ```",
        ),
        CommandEntry::new(
            "drush-twig-debug-on",
            "Drush",
            "Enable twig debug",
            "drush twig:debug on && drush state:set disable_rendered_output_cache_bins 1 --input-format=integer  && drush cache:rebuild",
            drush_docs("twig_debug"),
        )
        .with_description("Enable twig debug mode using drush command.")
        .with_example(
            "```\n\
             > drush twig:debug on\n\
             > [OK] Enabled twig debug.\n\
             > drush state:set disable_rendered_output_cache_bins 1 --input-format=integer\n\
             > drush cache:rebuild\n\
             > [success] Cache rebuild complete.\n\
             ```",
        ),
        CommandEntry::new(
            "drush-twig-debug-off",
            "Drush",
            "Disable twig debug",
            "drush twig:debug off && drush state:set disable_rendered_output_cache_bins 0 --input-format=integer && drush cache:rebuild",
            drush_docs("twig_debug"),
        )
        .with_description("Disable twig debug mode using drush command.")
        .with_example(
            "```\n\
             > drush twig:debug off\n\
             > [OK] Disabled twig debug.\n\
             > drush state:set disable_rendered_output_cache_bins 0 --input-format=integer\n\
             > drush cache:rebuild\n\
             > [success] Cache rebuild complete.\n\
             ```",
        ),
        CommandEntry::new(
            "drush-list-themes",
            "Drush",
            "List theme",
            "drush pm-list --type=Theme",
            drush_docs("pm_list"),
        )
        .with_description("List all the themes existing on the drupal website.")
        .with_example("![](2024-05-11T114445.jpg)"),
        CommandEntry::new(
            "drush-list-enabled-modules",
            "Drush",
            "List installed modules",
            "drush pm-list --type=Module --status=enabled",
            drush_docs("pm_list"),
        )
        .with_description("List enabled modules installed on the drupal website.")
        .with_example("![](2024-05-11T114956.jpg)"),
        CommandEntry::new(
            "drush-export-modules-csv",
            "Drush",
            "Export installed modules to csv",
            "drush pm-list --type=Module --status=enabled -vvv --format=csv >> enabled_modules.csv",
            drush_docs("pm_list"),
        )
        .with_description("Save enabled modules installed on the drupal website into a CSV file")
        .with_example(
            "```\n\
             pm-list:           list modules/themes\n\
             --type=Module:     list modules only\n\
             --status=enabled:  list enabled modules/theme only\n\
             --format:          format the result data.\n\
             -v|vv|vvv|verbose: increase the verbosity of messages\n\
             ```\n\
             ![](2024-05-11T115202.jpg)",
        ),
        CommandEntry::new(
            "govcms-admin-login",
            "GovCMS",
            "GovCMS Drupal Login (Unblock root user)",
            "admin_username=$(ahoy drush uinf --uid=1 --fields=name --format=string) && ahoy drush uublk $admin_username && ahoy login",
            "https://www.govcms.support/support/solutions/articles/51000005047-how-can-i-login-as-an-administrator-saas-on-my-local-development-environment-",
        )
        .with_description(
            "Using ahoy command to login into the drupal backend of the website with root user (uid=1)",
        )
        .with_example("![](2024-05-11T115503.jpg)"),
        CommandEntry::new(
            "ahoy-up",
            "Ahoy",
            "Start local containers",
            "ahoy up",
            "https://github.com/govCMS/scaffold",
        )
        .with_description("Build and start the local development containers with ahoy.")
        .with_example(
            "```\n\
             > ahoy up\n\
             > Creating network \"govcms_default\" with the default driver\n\
             > Starting govcms_mariadb_1 ... done\n\
             ```",
        ),
        CommandEntry::new(
            "twig-dump-context-keys",
            "Twig",
            "Dump available template variables",
            "{{ dump(_context|keys) }}",
            "https://www.drupal.org/docs/develop/theming-drupal/twig-in-drupal/discovering-and-inspecting-variables-in-twig-templates",
        )
        .with_description("Print the names of every variable available in a twig template."),
        CommandEntry::new(
            "drush-watchdog-errors",
            "Error",
            "Show recent errors",
            "drush watchdog:show --severity=Error --count=20",
            drush_docs("watchdog_show"),
        )
        .with_description("Show the latest error messages from the database log.")
        .with_example(
            "```\n\
             > drush watchdog:show --severity=Error --count=20\n\
             >  ID   Date          Type  Severity  Message\n\
             ```",
        ),
    ]
}
