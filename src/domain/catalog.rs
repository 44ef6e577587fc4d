// Static series catalog and region label table
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    #[serde(rename = "2G")]
    TwoG,
    #[serde(rename = "4G")]
    FourG,
    Blended,
    Other,
}

impl Technology {
    pub fn label(&self) -> &'static str {
        match self {
            Technology::TwoG => "2G",
            Technology::FourG => "4G",
            Technology::Blended => "Blended",
            Technology::Other => "Other",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Technology {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2g" => Ok(Technology::TwoG),
            "4g" => Ok(Technology::FourG),
            "blended" => Ok(Technology::Blended),
            "other" => Ok(Technology::Other),
            _ => Err(DashboardError::UnknownSelector(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    Normal,
    #[serde(rename = "MW")]
    Mw,
    #[serde(rename = "SP")]
    Sp,
    #[serde(rename = "75 Sites")]
    Sites75,
    All,
    Threshold,
}

impl Program {
    pub fn label(&self) -> &'static str {
        match self {
            Program::Normal => "Normal",
            Program::Mw => "MW",
            Program::Sp => "SP",
            Program::Sites75 => "75 Sites",
            Program::All => "All",
            Program::Threshold => "Threshold",
        }
    }

    /// URL-safe form, e.g. `75-sites`.
    pub fn slug(&self) -> String {
        self.label().to_ascii_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Program {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "normal" => Ok(Program::Normal),
            "mw" => Ok(Program::Mw),
            "sp" => Ok(Program::Sp),
            "75 sites" => Ok(Program::Sites75),
            "all" => Ok(Program::All),
            "threshold" => Ok(Program::Threshold),
            _ => Err(DashboardError::UnknownSelector(s.to_string())),
        }
    }
}

/// A (technology, program) pair naming one chart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSelector {
    pub technology: Technology,
    pub program: Program,
}

impl SeriesSelector {
    pub const fn new(technology: Technology, program: Program) -> Self {
        Self {
            technology,
            program,
        }
    }

    pub fn parse(technology: &str, program: &str) -> Result<Self, DashboardError> {
        let selector = Self::new(technology.parse()?, program.parse()?);
        if selector.catalog_entry().is_none() {
            return Err(DashboardError::UnknownSelector(selector.title()));
        }
        Ok(selector)
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.technology, self.program)
    }

    pub fn catalog_entry(&self) -> Option<&'static CatalogEntry> {
        SERIES_CATALOG.iter().find(|e| e.selector == *self)
    }

    /// Configured column list; empty when the pair is not catalogued.
    pub fn configured_columns(&self) -> &'static [&'static str] {
        self.catalog_entry().map(|e| e.columns).unwrap_or(&[])
    }
}

impl fmt::Display for SeriesSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub selector: SeriesSelector,
    pub columns: &'static [&'static str],
}

const fn entry(
    technology: Technology,
    program: Program,
    columns: &'static [&'static str],
) -> CatalogEntry {
    CatalogEntry {
        selector: SeriesSelector::new(technology, program),
        columns,
    }
}

/// Columns plotted per (technology, program), named after schema renames.
pub static SERIES_CATALOG: &[CatalogEntry] = &[
    entry(
        Technology::TwoG,
        Program::Normal,
        &["2G JAKARTA RAYA", "2G JAVA", "2G KALISUMAPA", "2G SUMATERA", "2G NATIONAL"],
    ),
    entry(
        Technology::TwoG,
        Program::Mw,
        &["2G JAKARTA RAYA MW", "2G JAVA MW", "2G SUMATERA MW", "2G NATIONAL MW"],
    ),
    entry(
        Technology::TwoG,
        Program::Sp,
        &[
            "2G JAKARTA RAYA SP",
            "2G JAVA SP",
            "2G KALISUMAPA SP",
            "2G SUMATERA SP",
            "2G NATIONAL SP",
        ],
    ),
    entry(
        Technology::TwoG,
        Program::Sites75,
        &["2G Part 75 from MW", "2G Part 75 from SP", "2G 75 Blended"],
    ),
    entry(
        Technology::FourG,
        Program::Normal,
        &["4G JAKARTA RAYA", "4G JAVA", "4G KALISUMAPA", "4G SUMATERA", "4G NATIONAL"],
    ),
    entry(
        Technology::FourG,
        Program::Mw,
        &["4G JAKARTA RAYA MW", "4G JAVA MW", "4G SUMATERA MW", "4G NATIONAL MW"],
    ),
    entry(
        Technology::FourG,
        Program::Sp,
        &[
            "4G JAKARTA RAYA SP",
            "4G JAVA SP",
            "4G KALISUMAPA SP",
            "4G SUMATERA SP",
            "4G NATIONAL SP",
        ],
    ),
    entry(
        Technology::FourG,
        Program::Sites75,
        &["4G Part 75 from MW", "4G Part 75 from SP", "4G 75 Blended"],
    ),
    entry(Technology::Blended, Program::All, &["2G 75 Blended", "4G 75 Blended"]),
    entry(
        Technology::Blended,
        Program::Mw,
        &["2G Part 75 from MW", "4G Part 75 from MW"],
    ),
    entry(
        Technology::Blended,
        Program::Sp,
        &["2G Part 75 from SP", "4G Part 75 from SP"],
    ),
    entry(Technology::Other, Program::Threshold, &["Threshold"]),
];

/// The fixed eight-panel grid, in display order.
pub static DASHBOARD_PANELS: [SeriesSelector; 8] = [
    SeriesSelector::new(Technology::TwoG, Program::Normal),
    SeriesSelector::new(Technology::TwoG, Program::Mw),
    SeriesSelector::new(Technology::TwoG, Program::Sp),
    SeriesSelector::new(Technology::TwoG, Program::Sites75),
    SeriesSelector::new(Technology::FourG, Program::Normal),
    SeriesSelector::new(Technology::FourG, Program::Mw),
    SeriesSelector::new(Technology::FourG, Program::Sp),
    SeriesSelector::new(Technology::FourG, Program::Sites75),
];

/// Canonical region label with its legend color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLabel {
    pub label: String,
    pub color: String,
}

impl RegionLabel {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Ordered label table. Earlier entries win, so the `Part 75 ...` labels sit
/// ahead of `75 Blended` and the region names.
pub fn default_region_labels() -> Vec<RegionLabel> {
    [
        ("Part 75 from MW", "#8c564b"),
        ("Part 75 from SP", "#e377c2"),
        ("75 Blended", "#17becf"),
        ("JAKARTA RAYA", "#1f77b4"),
        ("JAVA", "#ff7f0e"),
        ("KALISUMAPA", "#2ca02c"),
        ("SUMATERA", "#d62728"),
        ("NATIONAL", "#9467bd"),
        ("Threshold", "#7f7f7f"),
    ]
    .into_iter()
    .map(|(label, color)| RegionLabel::new(label, color))
    .collect()
}

/// Column rename applied by the schema normalizer when `from` is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

impl RenameRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Shortens the `Blended 75 Sites` export headers to their display names.
pub fn default_renames() -> Vec<RenameRule> {
    ["2G", "4G"]
        .into_iter()
        .flat_map(|tech| {
            [
                RenameRule::new(
                    format!("{tech} Blended 75 Sites MW"),
                    format!("{tech} Part 75 from MW"),
                ),
                RenameRule::new(
                    format!("{tech} Blended 75 Sites SP"),
                    format!("{tech} Part 75 from SP"),
                ),
                RenameRule::new(
                    format!("{tech} Blended 75 Sites"),
                    format!("{tech} 75 Blended"),
                ),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_panel_is_catalogued() {
        for selector in DASHBOARD_PANELS.iter() {
            assert!(
                !selector.configured_columns().is_empty(),
                "{selector} has no columns"
            );
        }
    }

    #[test]
    fn test_catalog_has_no_duplicate_selectors() {
        let selectors: HashSet<_> = SERIES_CATALOG.iter().map(|e| e.selector).collect();
        assert_eq!(selectors.len(), SERIES_CATALOG.len());
    }

    #[test]
    fn test_parse_selector_from_path_segments() {
        let selector = SeriesSelector::parse("4g", "75-sites").unwrap();
        assert_eq!(selector, SeriesSelector::new(Technology::FourG, Program::Sites75));
        assert_eq!(selector.title(), "4G - 75 Sites");
    }

    #[test]
    fn test_parse_rejects_uncatalogued_pair() {
        assert!(SeriesSelector::parse("2G", "Threshold").is_err());
        assert!(SeriesSelector::parse("5G", "Normal").is_err());
    }

    #[test]
    fn test_default_renames_put_specific_names_first() {
        let renames = default_renames();
        assert_eq!(renames.len(), 6);
        assert_eq!(renames[0].from, "2G Blended 75 Sites MW");
        assert_eq!(renames[2], RenameRule::new("2G Blended 75 Sites", "2G 75 Blended"));
    }

    #[test]
    fn test_program_slug_round_trips() {
        for program in [Program::Normal, Program::Sites75, Program::Mw] {
            assert_eq!(program.slug().parse::<Program>().unwrap(), program);
        }
    }
}
