use crate::render::RenderOptions;
use mathpad_compute::numerical::fmt::FormatOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for a [`Calculator`](crate::Calculator).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorOptions {
    /// How numbers in results are formatted.
    pub format: FormatOptions,

    /// How the tree is rendered to markup.
    pub render: RenderOptions,

    /// The number of edits that can be undone. Older snapshots are discarded.
    pub undo_depth: usize,

    /// The number of history entries kept, or [`None`] to keep every entry. The oldest entries
    /// are dropped first.
    pub history_limit: Option<usize>,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            format: FormatOptions::default(),
            render: RenderOptions::default(),
            undo_depth: 100,
            history_limit: None,
        }
    }
}

impl CalculatorOptions {
    /// Wraps the given [`CalculatorOptions`] into a builder for further customization.
    pub fn into_builder(self) -> CalculatorOptionsBuilder {
        CalculatorOptionsBuilder(self)
    }
}

/// A builder for [`CalculatorOptions`].
#[derive(Debug, Clone, Default)]
pub struct CalculatorOptionsBuilder(CalculatorOptions);

impl CalculatorOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how numbers in results are formatted.
    pub fn format(mut self, format: FormatOptions) -> Self {
        self.0.format = format;
        self
    }

    /// Wraps every rendered node in `\htmlId`.
    pub fn node_ids(mut self, node_ids: bool) -> Self {
        self.0.render.node_ids = node_ids;
        self
    }

    /// Sets the number of edits that can be undone.
    pub fn undo_depth(mut self, undo_depth: usize) -> Self {
        self.0.undo_depth = undo_depth;
        self
    }

    /// Limits the number of history entries kept.
    pub fn history_limit(mut self, history_limit: usize) -> Self {
        self.0.history_limit = Some(history_limit);
        self
    }

    /// Builds the options.
    pub fn build(self) -> CalculatorOptions {
        self.0
    }
}
