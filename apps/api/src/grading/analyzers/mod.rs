// Built-in, deterministic category analyzers. Each one is a replaceable default;
// the registry decides which analyzers run and how much each category weighs.

pub mod contact;
pub mod education;
pub mod experience;
pub mod format;
pub mod lexicon;
pub mod skills;
pub mod summary;
pub mod wording;

use std::sync::Arc;

use crate::grading::analyzer::CategoryAnalyzer;
use crate::models::analysis::CategoryId;

pub use contact::ContactAnalyzer;
pub use education::EducationAnalyzer;
pub use experience::ExperienceAnalyzer;
pub use format::FormatAnalyzer;
pub use skills::SkillsAnalyzer;
pub use summary::SummaryAnalyzer;
pub use wording::{
    ActionOrientedAnalyzer, AvoidedWordsAnalyzer, OverusageAnalyzer, SpecificsAnalyzer,
};

pub fn builtin_analyzer(category: CategoryId) -> Arc<dyn CategoryAnalyzer> {
    match category {
        CategoryId::Contact => Arc::new(ContactAnalyzer),
        CategoryId::Experience => Arc::new(ExperienceAnalyzer),
        CategoryId::Education => Arc::new(EducationAnalyzer),
        CategoryId::Skills => Arc::new(SkillsAnalyzer),
        CategoryId::Summary => Arc::new(SummaryAnalyzer),
        CategoryId::Format => Arc::new(FormatAnalyzer),
        CategoryId::ActionOriented => Arc::new(ActionOrientedAnalyzer),
        CategoryId::Specifics => Arc::new(SpecificsAnalyzer),
        CategoryId::Overusage => Arc::new(OverusageAnalyzer),
        CategoryId::AvoidedWords => Arc::new(AvoidedWordsAnalyzer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::sample_document;

    #[tokio::test]
    async fn test_every_category_has_a_matching_builtin() {
        let document = sample_document();
        for category in CategoryId::ALL {
            let analyzer = builtin_analyzer(category);
            assert_eq!(analyzer.category(), category);
            let result = analyzer.analyze(&document, 10).await.unwrap();
            assert_eq!(result.category, category);
            assert!(result.is_consistent(), "{category} inconsistent");
            assert!(result.pros.iter().chain(&result.cons).all(|f| f.is_valid()));
        }
    }
}
