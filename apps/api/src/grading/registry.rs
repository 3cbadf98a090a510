//! Composition root for the grading engine: the ordered list of
//! `(category, analyzer, max_score)` entries and the weight table derived from it.

use std::sync::Arc;

use crate::grading::analyzer::CategoryAnalyzer;
use crate::grading::analyzers::builtin_analyzer;
use crate::grading::error::GradingError;
use crate::grading::scoring::WeightTable;
use crate::models::analysis::CategoryId;

#[derive(Clone)]
pub struct RegisteredAnalyzer {
    pub category: CategoryId,
    pub max_score: u32,
    pub analyzer: Arc<dyn CategoryAnalyzer>,
}

/// Validated, immutable analyzer set. Registration order is the canonical order of
/// `ResumeAnalysis.categories`.
pub struct AnalyzerRegistry {
    entries: Vec<RegisteredAnalyzer>,
    weights: WeightTable,
}

impl AnalyzerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Pairs each configured category with its built-in analyzer.
    pub fn builtin(weights: &[(CategoryId, u32)]) -> Result<Self, GradingError> {
        weights
            .iter()
            .fold(Self::builder(), |builder, (category, weight)| {
                builder.register(*category, *weight, builtin_analyzer(*category))
            })
            .build()
    }

    pub fn entries(&self) -> &[RegisteredAnalyzer] {
        &self.entries
    }

    pub fn weight_table(&self) -> &WeightTable {
        &self.weights
    }

    pub fn canonical_order(&self) -> Vec<CategoryId> {
        self.entries.iter().map(|e| e.category).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<RegisteredAnalyzer>,
}

impl RegistryBuilder {
    pub fn register(
        mut self,
        category: CategoryId,
        max_score: u32,
        analyzer: Arc<dyn CategoryAnalyzer>,
    ) -> Self {
        self.entries.push(RegisteredAnalyzer {
            category,
            max_score,
            analyzer,
        });
        self
    }

    /// Fails with `InvalidWeightTable` on duplicate categories, weights not summing
    /// to 100, or an analyzer registered under a category it does not report on.
    pub fn build(self) -> Result<AnalyzerRegistry, GradingError> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.analyzer.category() != e.category)
        {
            return Err(GradingError::InvalidWeightTable(format!(
                "analyzer for '{}' registered under '{}'",
                entry.analyzer.category(),
                entry.category
            )));
        }

        let weights = WeightTable::new(
            self.entries
                .iter()
                .map(|e| (e.category, e.max_score))
                .collect(),
        )?;

        Ok(AnalyzerRegistry {
            entries: self.entries,
            weights,
        })
    }
}
