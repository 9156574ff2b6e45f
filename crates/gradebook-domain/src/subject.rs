//! Fixed subject catalog seeded into the database.

use crate::class::ClassLevel;

/// Subjects taught in classes 1–3.
pub const LOWER_SUBJECTS: &[&str] = &[
    "Bahasa Indonesia",
    "Matematika",
    "IPAS",
    "Pendidikan Pancasila",
    "Pendidikan Agama Islam",
    "PJOK",
    "Seni",
];

/// Subjects taught in classes 4–6.
pub const UPPER_SUBJECTS: &[&str] = &[
    "Bahasa Indonesia",
    "Bahasa Inggris",
    "Matematika",
    "IPAS",
    "Pendidikan Pancasila",
    "Pendidikan Agama Islam",
    "PJOK",
    "Seni",
];

/// One row of the seed catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: &'static str,
    pub level: ClassLevel,
}

/// Stable subject id: lowercase name, whitespace runs replaced by `-`, suffixed with the level.
///
/// `subject_id("Bahasa Indonesia", ClassLevel::Lower) == "bahasa-indonesia-3"`
pub fn subject_id(name: &str, level: ClassLevel) -> String {
    let slug = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("{slug}-{}", level.as_u8())
}

/// Every seeded subject, lower band first.
pub fn seed_catalog() -> Vec<CatalogEntry> {
    let lower = LOWER_SUBJECTS.iter().map(|name| (*name, ClassLevel::Lower));
    let upper = UPPER_SUBJECTS.iter().map(|name| (*name, ClassLevel::Upper));
    lower
        .chain(upper)
        .map(|(name, level)| CatalogEntry {
            id: subject_id(name, level),
            name,
            level,
        })
        .collect()
}
