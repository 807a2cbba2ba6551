// SPDX-License-Identifier: MPL-2.0
//! Waste classification results.

/// Broad material category of collected waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteCategory {
    MixedPlastic,
    Organic,
    Paper,
    Metal,
    Glass,
    Electronic,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 6] = [
        WasteCategory::MixedPlastic,
        WasteCategory::Organic,
        WasteCategory::Paper,
        WasteCategory::Metal,
        WasteCategory::Glass,
        WasteCategory::Electronic,
    ];

    /// i18n key of the category label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            WasteCategory::MixedPlastic => "waste-category-mixed-plastic",
            WasteCategory::Organic => "waste-category-organic",
            WasteCategory::Paper => "waste-category-paper",
            WasteCategory::Metal => "waste-category-metal",
            WasteCategory::Glass => "waste-category-glass",
            WasteCategory::Electronic => "waste-category-electronic",
        }
    }

    /// Stable identifier used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WasteCategory::MixedPlastic => "mixed_plastic",
            WasteCategory::Organic => "organic",
            WasteCategory::Paper => "paper",
            WasteCategory::Metal => "metal",
            WasteCategory::Glass => "glass",
            WasteCategory::Electronic => "electronic",
        }
    }

    /// Parses [`as_str`](Self::as_str) output.
    #[must_use]
    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value.trim())
    }
}

/// Estimated composition of one collection and the points it earns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasteAnalysis {
    pub category: WasteCategory,
    /// Estimated weight in kilograms, never negative.
    weight_kg: f64,
    pub points: u32,
}

impl WasteAnalysis {
    /// Creates an analysis. Negative or NaN weights become zero.
    #[must_use]
    pub fn new(category: WasteCategory, weight_kg: f64, points: u32) -> Self {
        let weight_kg = if weight_kg.is_nan() { 0.0 } else { weight_kg.max(0.0) };
        Self {
            category,
            weight_kg,
            points,
        }
    }

    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Weight formatted with one decimal, e.g. `8.5 kg`.
    #[must_use]
    pub fn format_weight(&self) -> String {
        format!("{:.1} kg", self.weight_kg)
    }
}

impl Default for WasteAnalysis {
    fn default() -> Self {
        Self::new(WasteCategory::MixedPlastic, 8.5, 42)
    }
}
