use crate::model::{IntentGraphNode, LegendEntry};
use indexmap::IndexMap;

/// Intent-to-color assignment, keyed by the raw (case-sensitive) intent string.
///
/// Edge grouping lowercases intents but the legend does not, so `"Purchase"` and `"purchase"`
/// share an edge yet get separate entries.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    colors: IndexMap<String, String>,
    fallback: String,
}

impl Legend {
    /// Colors are assigned in first-occurrence order, cycling through `palette`.
    pub fn build(nodes: &[IntentGraphNode], palette: &[String]) -> Self {
        let mut colors: IndexMap<String, String> = IndexMap::new();
        if !palette.is_empty() {
            for n in nodes {
                if colors.contains_key(n.intent.as_str()) {
                    continue;
                }
                let color = palette[colors.len() % palette.len()].clone();
                colors.insert(n.intent.clone(), color);
            }
        }
        Self {
            colors,
            fallback: palette.first().cloned().unwrap_or_default(),
        }
    }

    /// Falls back to the first palette color for unknown intents.
    pub fn color_for(&self, intent: &str) -> &str {
        self.colors
            .get(intent)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn entries(&self) -> Vec<LegendEntry> {
        self.colors
            .iter()
            .map(|(intent, color)| LegendEntry {
                intent: intent.clone(),
                color: color.clone(),
            })
            .collect()
    }
}
