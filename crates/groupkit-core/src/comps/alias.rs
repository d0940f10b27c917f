//! Mapping from coarse, legacy group names to comps categories and groups.

use super::state::QueryMode;

/// Where a requested group name points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    pub mode: QueryMode,
    /// Canonical ids, never empty.
    pub ids: Vec<String>,
}

/// Fixed alias table. Lookups are exact and case-sensitive.
static ALIASES: &[(&str, QueryMode, &[&str])] = &[
    (
        "internet",
        QueryMode::GroupLookup,
        &["graphical-internet", "text-internet"],
    ),
    ("legacy", QueryMode::GroupLookup, &["legacy-software-support"]),
    ("publishing", QueryMode::GroupLookup, &["authoring-and-publishing"]),
    ("desktop-kde", QueryMode::CategoryLookup, &["kde-desktop-environment"]),
    ("desktop-gnome", QueryMode::CategoryLookup, &["gnome-desktop-environment"]),
    ("desktop-xfce", QueryMode::CategoryLookup, &["xfce-desktop-environment"]),
    ("desktop-other", QueryMode::CategoryLookup, &["lxde-desktop-environment"]),
    ("programming", QueryMode::CategoryLookup, &["development"]),
    ("servers", QueryMode::CategoryLookup, &["servers"]),
    ("system", QueryMode::CategoryLookup, &["base-system"]),
];

/// Resolve a requested group name.
///
/// Total: names outside the table are taken as literal group ids.
pub fn resolve_alias(input: &str) -> AliasTarget {
    match ALIASES.iter().find(|(name, _, _)| *name == input) {
        Some((_, mode, ids)) => AliasTarget {
            mode: *mode,
            ids: ids.iter().map(|id| id.to_string()).collect(),
        },
        None => AliasTarget {
            mode: QueryMode::GroupLookup,
            ids: vec![input.to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internet_expands_to_two_groups() {
        let target = resolve_alias("internet");
        assert_eq!(target.mode, QueryMode::GroupLookup);
        assert_eq!(target.ids, ["graphical-internet", "text-internet"]);
    }

    #[test]
    fn test_desktop_aliases_are_categories() {
        let cases = [
            ("desktop-kde", "kde-desktop-environment"),
            ("desktop-gnome", "gnome-desktop-environment"),
            ("desktop-xfce", "xfce-desktop-environment"),
            ("desktop-other", "lxde-desktop-environment"),
            ("programming", "development"),
            ("servers", "servers"),
            ("system", "base-system"),
        ];
        for (input, id) in cases {
            let target = resolve_alias(input);
            assert_eq!(target.mode, QueryMode::CategoryLookup, "{}", input);
            assert_eq!(target.ids, [id], "{}", input);
        }
    }

    #[test]
    fn test_group_aliases() {
        assert_eq!(resolve_alias("legacy").ids, ["legacy-software-support"]);
        assert_eq!(resolve_alias("publishing").ids, ["authoring-and-publishing"]);
    }

    #[test]
    fn test_unknown_input_is_literal_group() {
        let target = resolve_alias("nonexistent-group");
        assert_eq!(target.mode, QueryMode::GroupLookup);
        assert_eq!(target.ids, ["nonexistent-group"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let target = resolve_alias("Internet");
        assert_eq!(target.mode, QueryMode::GroupLookup);
        assert_eq!(target.ids, ["Internet"]);
    }

    #[test]
    fn test_every_alias_resolves_non_empty() {
        let names = ALIASES.iter().map(|(name, _, _)| *name);
        for name in names.chain(["", "desktop", "servers "]) {
            assert!(!resolve_alias(name).ids.is_empty(), "{:?}", name);
        }
        assert_eq!(ALIASES.len(), 10);
    }
}
