//! Local preview of how the catalog places an imported product.
//!
//! The import endpoint owns the real category table. It matches the
//! breadcrumb against the top-level seed categories by shared words and
//! files the product under the best seed, creating a subcategory named
//! after the last crumb when that crumb is not the seed itself. The same
//! rules are reproduced here so `zuni import --dry-run` can show where a
//! product would land.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
}

impl SeedCategory {
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct CategorySeedsFile {
    pub seeds: Vec<SeedCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCategory {
    pub name: String,
    pub slug: String,
}

/// Where a product would be filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPlacement {
    pub seed: SeedCategory,
    /// `None` when the product goes straight under the seed.
    pub subcategory: Option<SubCategory>,
}

/// Load and validate the category seeds from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_category_seeds(path: &Path) -> Result<CategorySeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seeds_file: CategorySeedsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SeedsFileParse)?;

    validate_seeds(&seeds_file)?;

    Ok(seeds_file)
}

fn validate_seeds(seeds_file: &CategorySeedsFile) -> Result<(), ConfigError> {
    if seeds_file.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed category is required".to_string(),
        ));
    }

    let mut seen_slugs = HashSet::new();
    for seed in &seeds_file.seeds {
        if seed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "seed category name must be non-empty".to_string(),
            ));
        }

        let slug = seed.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "seed category '{}' has no usable characters for a slug",
                seed.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate seed slug: '{}' (from seed '{}')",
                slug, seed.name
            )));
        }
    }

    Ok(())
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

/// Lowercase, strip Portuguese accents, and reduce everything that is not
/// an ASCII letter or digit to single spaces.
///
/// `"Eletrônicos, Áudio & Vídeo"` becomes `"eletronicos audio video"`.
#[must_use]
pub fn normalize_label(input: &str) -> String {
    input
        .chars()
        .map(fold_accent)
        .map(|c| c.to_ascii_lowercase())
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// URL-safe slug: the normalized label joined with hyphens.
#[must_use]
pub fn slugify(input: &str) -> String {
    normalize_label(input).replace(' ', "-")
}

/// Pick the seed sharing the most words with the breadcrumb.
///
/// Ties go to the seed listed first. When no seed shares a word, the first
/// seed is returned. `None` only when `seeds` is empty.
#[must_use]
pub fn pick_closest_seed<'a>(
    seeds: &'a [SeedCategory],
    crumbs: &[String],
) -> Option<&'a SeedCategory> {
    let haystack = normalize_label(&crumbs.join(" "));
    let hay_tokens: HashSet<&str> = haystack.split_whitespace().collect();

    let mut best: Option<(&SeedCategory, usize)> = None;
    for seed in seeds {
        let needle = normalize_label(&seed.name);
        let score = needle
            .split_whitespace()
            .filter(|t| hay_tokens.contains(t))
            .count();
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((seed, score)),
        }
    }

    best.map(|(seed, _)| seed)
}

/// Reproduce the catalog's placement for a breadcrumb.
///
/// The leaf label is `category_name` when non-blank, otherwise the last
/// crumb. The product lands on the seed itself when the leaf normalizes to
/// the seed's name, and in a subcategory named after the leaf otherwise.
#[must_use]
pub fn place_category(
    seeds: &[SeedCategory],
    category_path: &[String],
    category_name: &str,
) -> Option<CategoryPlacement> {
    let path: Vec<String> = category_path
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let leaf = match category_name.trim() {
        "" => path.last().cloned().unwrap_or_default(),
        name => name.to_string(),
    };

    let mut crumbs = path;
    crumbs.push(leaf.clone());
    let seed = pick_closest_seed(seeds, &crumbs)?.clone();

    let subcategory = if leaf.is_empty() || normalize_label(&leaf) == normalize_label(&seed.name)
    {
        None
    } else {
        Some(SubCategory {
            slug: slugify(&leaf),
            name: leaf,
        })
    };

    Some(CategoryPlacement { seed, subcategory })
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
