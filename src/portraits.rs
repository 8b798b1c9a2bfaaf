//! Portrait discovery - image directory → portraits grouped by person
//!
//! A portrait file is named `<person><n>.<ext>`, for example `张三1.jpg` and
//! `张三2.jpg`. The trailing number orders a person's portraits; a file with
//! no number sorts first.

use crate::error::RosterResult;
use crate::types::Portrait;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Portraits grouped by owner name, each group sorted by its order number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortraitIndex {
    groups: BTreeMap<String, Vec<Portrait>>,
}

impl PortraitIndex {
    /// Scan the regular files directly inside `dir`
    pub fn scan(dir: &Path) -> RosterResult<Self> {
        let mut portraits = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match parse_portrait(&path) {
                Some(portrait) => portraits.push(portrait),
                None => debug!(path = %path.display(), "not a portrait, skipped"),
            }
        }

        Ok(Self::from_portraits(portraits))
    }

    pub fn from_portraits(portraits: impl IntoIterator<Item = Portrait>) -> Self {
        let mut groups: BTreeMap<String, Vec<Portrait>> = BTreeMap::new();
        for portrait in portraits {
            groups.entry(portrait.owner.clone()).or_default().push(portrait);
        }
        for group in groups.values_mut() {
            // Equal orders keep a stable, name-based position
            group.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.path.cmp(&b.path)));
        }
        Self { groups }
    }

    /// Portraits of `owner` in order
    pub fn get(&self, owner: &str) -> &[Portrait] {
        self.groups.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Portrait])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Split a portrait file name into owner and order.
///
/// Returns `None` for unsupported extensions or stems with no name part.
pub fn parse_portrait(path: &Path) -> Option<Portrait> {
    static STEM: OnceLock<Regex> = OnceLock::new();
    let stem_pattern = STEM.get_or_init(|| {
        Regex::new(r"^(?P<name>.+?)(?P<index>[0-9]+)?$").expect("valid portrait pattern")
    });

    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    let captures = stem_pattern.captures(stem)?;
    let owner = captures.name("name")?.as_str().trim();
    if owner.is_empty() {
        return None;
    }

    // Numbers too long for u32 sort last rather than failing the scan
    let order = captures
        .name("index")
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .unwrap_or(0);

    Some(Portrait {
        owner: owner.to_string(),
        order,
        path: path.to_path_buf(),
    })
}
