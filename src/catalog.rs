//! Tech entity catalog
//!
//! Ordered `(id, TechEntity)` pairs. Order is insertion order so layouts
//! built from the same catalog and seed are reproducible.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SandboxError;

/// Category a tech entity is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechCategory {
    Frontend,
    Language,
    Styling,
    Mobile,
    Backend,
    #[serde(rename = "API Testing")]
    ApiTesting,
    Design,
    #[serde(rename = "Version Control")]
    VersionControl,
}

impl TechCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechCategory::Frontend => "Frontend",
            TechCategory::Language => "Language",
            TechCategory::Styling => "Styling",
            TechCategory::Mobile => "Mobile",
            TechCategory::Backend => "Backend",
            TechCategory::ApiTesting => "API Testing",
            TechCategory::Design => "Design",
            TechCategory::VersionControl => "Version Control",
        }
    }
}

/// A drawable entity. Read-only to the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechEntity {
    /// Display name (drawn as the bubble label)
    pub name: String,
    /// Devicon class, e.g. `devicon-react-original colored`
    pub icon: String,
    /// Hex color, `#RRGGBB`
    pub color: String,
    pub category: TechCategory,
    pub description: String,
}

/// JSON row: the entity fields plus its stable id
#[derive(Deserialize)]
struct CatalogRow {
    id: String,
    #[serde(flatten)]
    tech: TechEntity,
}

/// Ordered mapping from stable id to entity
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(String, Arc<TechEntity>)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. A repeated id replaces the earlier entity in place.
    pub fn insert(&mut self, id: impl Into<String>, tech: TechEntity) {
        let id = id.into();
        let tech = Arc::new(tech);
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some(entry) => entry.1 = tech,
            None => self.entries.push((id, tech)),
        }
    }

    /// Parse an ordered JSON array of `{ "id": ..., "name": ..., ... }`
    pub fn from_json(json: &str) -> Result<Self, SandboxError> {
        let rows: Vec<CatalogRow> = serde_json::from_str(json).map_err(SandboxError::Catalog)?;
        let mut catalog = Self::new();
        for row in rows {
            catalog.insert(row.id, row.tech);
        }
        Ok(catalog)
    }

    pub fn entries(&self) -> &[(String, Arc<TechEntity>)] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Arc<TechEntity>> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, tech)| tech)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick one entry uniformly (None when empty)
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&(String, Arc<TechEntity>)> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        self.entries.get(index)
    }

    /// Distinct icon references, in catalog order
    pub fn icon_refs(&self) -> Vec<&str> {
        let mut icons: Vec<&str> = Vec::with_capacity(self.entries.len());
        for (_, tech) in &self.entries {
            if !icons.contains(&tech.icon.as_str()) {
                icons.push(&tech.icon);
            }
        }
        icons
    }

    /// The default tech stack shown by the sandbox
    pub fn builtin() -> Self {
        use TechCategory::*;

        let rows: [(&str, &str, &str, &str, TechCategory, &str); 15] = [
            (
                "react",
                "React",
                "devicon-react-original colored",
                "#61DAFB",
                Frontend,
                "Modern React with Hooks, Context API, and performance optimization.",
            ),
            (
                "html",
                "HTML5",
                "devicon-html5-plain",
                "#E34F26",
                Frontend,
                "Semantic markup and modern web standards.",
            ),
            (
                "css",
                "CSS3",
                "devicon-css3-plain",
                "#1572B6",
                Frontend,
                "Modern CSS with Grid, Flexbox, and animations.",
            ),
            (
                "tailwind",
                "Tailwind CSS",
                "devicon-tailwindcss-original colored",
                "#06B6D4",
                Styling,
                "Utility-first CSS framework for rapid UI development.",
            ),
            (
                "javascript",
                "JavaScript",
                "devicon-javascript-plain colored",
                "#F7DF1E",
                Language,
                "Modern ES6+ JavaScript: async/await, destructuring, modules.",
            ),
            (
                "typescript",
                "TypeScript",
                "devicon-typescript-plain colored",
                "#3178C6",
                Language,
                "Type-safe JavaScript development with advanced type patterns.",
            ),
            (
                "dart",
                "Dart",
                "devicon-dart-plain colored",
                "#0175C2",
                Language,
                "Modern language for Flutter development.",
            ),
            (
                "kotlin",
                "Kotlin",
                "devicon-kotlin-plain colored",
                "#7F52FF",
                Language,
                "Modern Android development language.",
            ),
            (
                "flutter",
                "Flutter",
                "devicon-flutter-plain colored",
                "#02569B",
                Mobile,
                "Cross-platform mobile development with Dart.",
            ),
            (
                "jetpack",
                "Jetpack Compose",
                "devicon-jetpackcompose-plain-wordmark colored",
                "#3DDC84",
                Mobile,
                "Declarative UI toolkit for Android.",
            ),
            (
                "laravel",
                "Laravel",
                "devicon-laravel-original colored",
                "#FF2D20",
                Backend,
                "Elegant PHP framework for web development.",
            ),
            (
                "postman",
                "Postman",
                "devicon-postman-plain colored",
                "#FF6C37",
                ApiTesting,
                "API development and testing platform.",
            ),
            (
                "figma",
                "Figma",
                "devicon-figma-plain colored",
                "#1ABCFE",
                Design,
                "Collaborative interface design tool.",
            ),
            (
                "photoshop",
                "Adobe Photoshop",
                "devicon-photoshop-plain colored",
                "#31A8FF",
                Design,
                "Digital image editing and design.",
            ),
            (
                "github",
                "GitHub",
                "devicon-github-original",
                "#181717",
                VersionControl,
                "Git repository hosting and collaboration platform.",
            ),
        ];

        let mut catalog = Self::new();
        for (id, name, icon, color, category, description) in rows {
            catalog.insert(
                id,
                TechEntity {
                    name: name.to_string(),
                    icon: icon.to_string(),
                    color: color.to_string(),
                    category,
                    description: description.to_string(),
                },
            );
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_builtin_order_is_stable() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.entries()[0].0, "react");
        assert_eq!(catalog.entries()[14].0, "github");
        assert_eq!(
            catalog.get("postman").map(|t| t.category),
            Some(TechCategory::ApiTesting)
        );
    }

    #[test]
    fn test_from_json_keeps_order_and_category_names() {
        let json = r##"[
            {"id": "rust", "name": "Rust", "icon": "devicon-rust-plain", "color": "#000000",
             "category": "Language", "description": "Systems language"},
            {"id": "git", "name": "Git", "icon": "devicon-git-plain", "color": "#F05032",
             "category": "Version Control", "description": "VCS"}
        ]"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].0, "rust");
        assert_eq!(catalog.entries()[1].1.category, TechCategory::VersionControl);
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let json = r##"[{"id": "x", "name": "X", "icon": "i", "color": "#fff",
                         "category": "Cooking", "description": ""}]"##;
        assert!(matches!(
            Catalog::from_json(json),
            Err(SandboxError::Catalog(_))
        ));
    }

    #[test]
    fn test_insert_replaces_duplicate_id() {
        let mut catalog = Catalog::builtin();
        let mut tech = (**catalog.get("react").unwrap()).clone();
        tech.name = "React 19".to_string();
        catalog.insert("react", tech);
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.entries()[0].1.name, "React 19");
    }

    #[test]
    fn test_sample() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(Catalog::new().sample(&mut rng).is_none());
        let catalog = Catalog::builtin();
        let (id, _) = catalog.sample(&mut rng).unwrap();
        assert!(catalog.get(id).is_some());
    }
}
