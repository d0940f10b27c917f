//! Catalog state machine driven by the markup parser.
//!
//! One [`ParseContext`] tracks where a walk is inside a comps document and
//! whether the category or group currently open is the one being looked for.
//! Catalogs nest at most two levels below the root (category or group, then
//! one field), so a flat state plus a match flag is enough.

use super::parser::MarkupHandler;
use tracing::trace;

/// What a walk is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Find a category and collect its `groupid` entries.
    CategoryLookup,
    /// Find a group and collect its `packagereq` entries.
    GroupLookup,
}

/// Structural position of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    /// Fresh context, no walk started yet.
    OutsideInterest,
    InCategory,
    InCategoryId,
    InCategoryGroupRef,
    InGroup,
    InGroupId,
    InGroupPackageRef,
    InGroupDescription,
    Ignored,
}

/// Mutable state for one catalog walk.
#[derive(Debug, Clone)]
pub struct ParseContext {
    query_mode: QueryMode,
    target_id: String,
    current_state: CatalogState,
    match_active: bool,
    locale_tag: String,
    collected_group_ids: Vec<String>,
    collected_package_names: Vec<String>,
}

impl ParseContext {
    pub fn new(
        query_mode: QueryMode,
        target_id: impl Into<String>,
        locale_tag: impl Into<String>,
    ) -> Self {
        Self {
            query_mode,
            target_id: target_id.into(),
            current_state: CatalogState::OutsideInterest,
            match_active: false,
            locale_tag: locale_tag.into(),
            collected_group_ids: Vec::new(),
            collected_package_names: Vec::new(),
        }
    }

    /// Reset the structural state before handing the context to the parser.
    ///
    /// Collected output is kept, so one context can walk several documents.
    pub fn begin_walk(&mut self) {
        self.current_state = CatalogState::Ignored;
        self.match_active = false;
    }

    pub fn query_mode(&self) -> QueryMode {
        self.query_mode
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn current_state(&self) -> CatalogState {
        self.current_state
    }

    pub fn match_active(&self) -> bool {
        self.match_active
    }

    pub fn collected_group_ids(&self) -> &[String] {
        &self.collected_group_ids
    }

    pub fn collected_package_names(&self) -> &[String] {
        &self.collected_package_names
    }

    /// Consume the context, returning whichever collection its mode fills.
    pub fn into_collected(self) -> Vec<String> {
        match self.query_mode {
            QueryMode::CategoryLookup => self.collected_group_ids,
            QueryMode::GroupLookup => self.collected_package_names,
        }
    }

    fn start_category_element(&mut self, name: &str) {
        match name {
            "category" => self.current_state = CatalogState::InCategory,
            "id" if self.current_state == CatalogState::InCategory => {
                self.current_state = CatalogState::InCategoryId
            }
            "groupid" => self.current_state = CatalogState::InCategoryGroupRef,
            "name" | "description" | "display_order" | "grouplist" => {
                self.current_state = CatalogState::Ignored
            }
            _ => {}
        }
    }

    fn start_group_element(&mut self, name: &str, attributes: &[(String, String)]) {
        match name {
            "group" => self.current_state = CatalogState::InGroup,
            "id" if self.current_state == CatalogState::InGroup => {
                self.current_state = CatalogState::InGroupId
            }
            "packagereq" => self.current_state = CatalogState::InGroupPackageRef,
            // Only the first attribute is consulted, and only its value. A
            // description whose locale attribute is not first is skipped.
            "description" => {
                let first_value = attributes.first().map(|(_, value)| value.as_str());
                self.current_state = if first_value == Some(self.locale_tag.as_str()) {
                    CatalogState::InGroupDescription
                } else {
                    CatalogState::Ignored
                };
            }
            "name" | "default" | "uservisible" | "packagelist" => {
                self.current_state = CatalogState::Ignored
            }
            _ => {}
        }
    }
}

impl MarkupHandler for ParseContext {
    fn start_element(&mut self, name: &str, attributes: &[(String, String)]) {
        match self.query_mode {
            QueryMode::CategoryLookup => self.start_category_element(name),
            QueryMode::GroupLookup => self.start_group_element(name, attributes),
        }
    }

    fn text(&mut self, text: &str) {
        let id_state = match self.query_mode {
            QueryMode::CategoryLookup => CatalogState::InCategoryId,
            QueryMode::GroupLookup => CatalogState::InGroupId,
        };
        if self.current_state == id_state && text == self.target_id {
            self.match_active = true;
        }

        if !self.match_active {
            return;
        }
        match self.current_state {
            CatalogState::InCategoryGroupRef => {
                trace!(group = text, "collected group reference");
                self.collected_group_ids.push(text.to_string());
            }
            CatalogState::InGroupPackageRef => {
                trace!(package = text, "collected package reference");
                self.collected_package_names.push(text.to_string());
            }
            CatalogState::InGroupDescription => {
                trace!(description = text, "matched localized description");
            }
            _ => {}
        }
    }

    fn end_element(&mut self, name: &str) {
        match name {
            "groupid" | "packagereq" | "description" if self.match_active => {
                self.current_state = CatalogState::Ignored
            }
            // Closing any category or group ends its match, so a non-matching
            // unit never leaks state into the next one.
            "category" | "group" => self.match_active = false,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comps::parser::parse_markup;

    const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<comps>
  <group>
    <id>gnome-desktop</id>
    <name>GNOME</name>
    <description>GNOME is a desktop</description>
    <description xml:lang="de">GNOME ist ein Desktop</description>
    <default>true</default>
    <uservisible>true</uservisible>
    <packagelist>
      <packagereq type="mandatory">gnome-shell</packagereq>
      <packagereq type="default">nautilus</packagereq>
      <packagereq type="optional">gnome-shell</packagereq>
    </packagelist>
  </group>
  <group>
    <id>gnome-apps</id>
    <packagelist>
      <packagereq>gedit</packagereq>
    </packagelist>
  </group>
  <category>
    <id>gnome-desktop-environment</id>
    <name>GNOME Desktop</name>
    <display_order>5</display_order>
    <grouplist>
      <groupid>gnome-desktop</groupid>
      <groupid>gnome-apps</groupid>
    </grouplist>
  </category>
  <category>
    <id>development</id>
    <grouplist>
      <groupid>c-development</groupid>
    </grouplist>
  </category>
</comps>
"#;

    fn walk(mode: QueryMode, target: &str, locale: &str, doc: &str) -> ParseContext {
        let mut ctx = ParseContext::new(mode, target, locale);
        ctx.begin_walk();
        parse_markup(doc.as_bytes(), &mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_group_lookup_collects_packages_in_order_with_duplicates() {
        let ctx = walk(QueryMode::GroupLookup, "gnome-desktop", "C", CATALOG);
        assert_eq!(
            ctx.collected_package_names(),
            ["gnome-shell", "nautilus", "gnome-shell"]
        );
        assert!(ctx.collected_group_ids().is_empty());
    }

    #[test]
    fn test_category_lookup_collects_group_ids() {
        let ctx = walk(
            QueryMode::CategoryLookup,
            "gnome-desktop-environment",
            "C",
            CATALOG,
        );
        assert_eq!(ctx.collected_group_ids(), ["gnome-desktop", "gnome-apps"]);
        assert!(ctx.collected_package_names().is_empty());
    }

    #[test]
    fn test_absent_id_yields_empty_collection() {
        let ctx = walk(QueryMode::GroupLookup, "kde-desktop", "C", CATALOG);
        assert!(ctx.into_collected().is_empty());
    }

    #[test]
    fn test_match_is_exact_and_case_sensitive() {
        let ctx = walk(QueryMode::GroupLookup, "GNOME-desktop", "C", CATALOG);
        assert!(ctx.collected_package_names().is_empty());
        let ctx = walk(QueryMode::GroupLookup, "gnome", "C", CATALOG);
        assert!(ctx.collected_package_names().is_empty());
    }

    #[test]
    fn test_match_does_not_leak_into_next_group() {
        let ctx = walk(QueryMode::GroupLookup, "gnome-apps", "C", CATALOG);
        assert_eq!(ctx.collected_package_names(), ["gedit"]);
        assert!(!ctx.match_active());
    }

    #[test]
    fn test_description_requires_locale_in_first_attribute() {
        let mut ctx = ParseContext::new(QueryMode::GroupLookup, "g", "de");
        ctx.begin_walk();
        ctx.start_element("group", &[]);
        ctx.start_element("description", &[("xml:lang".into(), "de".into())]);
        assert_eq!(ctx.current_state(), CatalogState::InGroupDescription);

        ctx.start_element(
            "description",
            &[
                ("class".into(), "long".into()),
                ("xml:lang".into(), "de".into()),
            ],
        );
        assert_eq!(ctx.current_state(), CatalogState::Ignored);

        ctx.start_element("description", &[]);
        assert_eq!(ctx.current_state(), CatalogState::Ignored);
    }

    #[test]
    fn test_description_text_is_not_collected() {
        let ctx = walk(QueryMode::GroupLookup, "gnome-desktop", "de", CATALOG);
        assert!(!ctx
            .collected_package_names()
            .iter()
            .any(|p| p.contains("Desktop")));
    }

    #[test]
    fn test_id_only_recognized_directly_in_unit() {
        let mut ctx = ParseContext::new(QueryMode::CategoryLookup, "x", "C");
        ctx.begin_walk();
        ctx.start_element("id", &[]);
        assert_eq!(ctx.current_state(), CatalogState::Ignored);
        ctx.text("x");
        assert!(!ctx.match_active());
    }

    #[test]
    fn test_begin_walk_resets_state() {
        let mut ctx = ParseContext::new(QueryMode::GroupLookup, "g", "C");
        assert_eq!(ctx.current_state(), CatalogState::OutsideInterest);
        ctx.begin_walk();
        ctx.start_element("group", &[]);
        ctx.start_element("id", &[]);
        ctx.text("g");
        assert!(ctx.match_active());
        ctx.begin_walk();
        assert_eq!(ctx.current_state(), CatalogState::Ignored);
        assert!(!ctx.match_active());
    }

    #[test]
    fn test_field_close_narrows_only_while_matching() {
        let mut ctx = ParseContext::new(QueryMode::GroupLookup, "g", "C");
        ctx.begin_walk();
        ctx.start_element("group", &[]);
        ctx.start_element("packagereq", &[]);
        ctx.end_element("packagereq");
        assert_eq!(ctx.current_state(), CatalogState::InGroupPackageRef);
    }
}
