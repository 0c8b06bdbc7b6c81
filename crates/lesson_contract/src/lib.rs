//! Shared contract types between the desktop window manager runtime and the lesson content engine.
//!
//! The window manager only needs to know which launchable ids are lesson modules and how to ask
//! for a lesson payload. Everything about generating or grading lessons lives on the other side
//! of [`LessonContentLoader`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of lessons in a full module curriculum.
pub const CURRICULUM_LENGTH: u32 = 12;
/// Number of options every generated quiz question must offer.
pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Answer letter for a multiple-choice quiz option.
pub enum QuizLetter {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
    /// Fourth option.
    D,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One selectable answer in a quiz question.
pub struct QuizOption {
    /// Option letter shown beside the answer text.
    pub letter: QuizLetter,
    /// Answer text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Multiple-choice question attached to a lesson.
pub struct QuizQuestion {
    /// Question prompt.
    pub question: String,
    /// Answer options, lettered A through D.
    pub options: Vec<QuizOption>,
    /// Letter of the correct option.
    pub correct_letter: QuizLetter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Lesson payload shared by the content generator and the local archive fallback.
pub struct LessonContent {
    /// Lesson heading.
    pub title: String,
    /// Learning objectives for the lesson.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Primary study notes (markdown).
    #[serde(alias = "content")]
    pub body: String,
    /// Optional deep-dive notes (markdown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_notes: Option<String>,
    /// Assessment questions for the lesson.
    #[serde(default)]
    pub quizzes: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Catalog record for a lesson module that can be launched as a window.
pub struct LessonModule {
    /// Launchable id, shared with the window registry.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Symbolic icon reference.
    pub icon: String,
    /// Lessons the learner has already completed in this module.
    pub lessons_finished: u32,
    /// Total lessons in the module curriculum.
    pub total_lessons: u32,
    /// Locally cached lessons used when generated content is unavailable.
    #[serde(default)]
    pub archive: Vec<LessonContent>,
}

impl LessonModule {
    /// Returns the 1-based number of the lesson the learner should take next.
    pub fn next_lesson_number(&self) -> u32 {
        self.lessons_finished.saturating_add(1)
    }

    /// Returns the archived lesson for the learner's current position, falling back to the first.
    pub fn archived_lesson(&self) -> Option<&LessonContent> {
        self.archive
            .get(self.lessons_finished as usize)
            .or_else(|| self.archive.first())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Complexity band requested from the content generator.
pub enum LessonTier {
    /// Lessons 1-3.
    Foundational,
    /// Lessons 4-8.
    Intermediate,
    /// Lessons 9 and later.
    Advanced,
}

impl LessonTier {
    /// Returns the tier for a 1-based lesson number.
    pub fn for_lesson(lesson_number: u32) -> Self {
        match lesson_number {
            0..=3 => Self::Foundational,
            4..=8 => Self::Intermediate,
            _ => Self::Advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Arguments for one content-generation request.
pub struct LessonQuery {
    /// Module id being studied.
    pub module_id: String,
    /// Module display title, used as the generation topic.
    pub module_title: String,
    /// 1-based lesson number within the curriculum.
    pub lesson_number: u32,
    /// Learner level used to calibrate difficulty.
    pub learner_level: u32,
}

impl LessonQuery {
    /// Returns the complexity tier implied by [`Self::lesson_number`].
    pub fn tier(&self) -> LessonTier {
        LessonTier::for_lesson(self.lesson_number)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Failures reported by a [`LessonContentLoader`].
pub enum LessonLoadError {
    /// The loader has no remote backend available.
    #[error("lesson generator is offline")]
    Offline,
    /// The remote generator rejected the request.
    #[error("lesson generator rejected the request: {0}")]
    Rejected(String),
    /// The generator answered with text that is not a lesson payload.
    #[error("malformed lesson payload: {0}")]
    Malformed(String),
    /// The payload parsed but violates lesson shape rules.
    #[error("invalid lesson payload: {0}")]
    Invalid(String),
}

/// Object-safe boxed future returned by [`LessonContentLoader`].
pub type LessonLoadFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Asynchronous lesson content source consumed by the desktop runtime.
///
/// Futures are not `Send`; the runtime drives them on the single-threaded UI executor.
pub trait LessonContentLoader {
    /// Requests the lesson described by `query`.
    fn load_lesson_content(
        &self,
        query: LessonQuery,
    ) -> LessonLoadFuture<'static, Result<LessonContent, LessonLoadError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Loader that never reaches a generator, so every launch resolves from the local archive.
pub struct OfflineLessonLoader;

impl LessonContentLoader for OfflineLessonLoader {
    fn load_lesson_content(
        &self,
        _query: LessonQuery,
    ) -> LessonLoadFuture<'static, Result<LessonContent, LessonLoadError>> {
        Box::pin(futures::future::ready(Err::<LessonContent, _>(
            LessonLoadError::Offline,
        )))
    }
}

/// Parses and validates a generated lesson JSON document.
///
/// # Errors
///
/// Returns [`LessonLoadError::Malformed`] when `raw` is not a lesson document and
/// [`LessonLoadError::Invalid`] when it breaks a shape rule (empty title, wrong option count,
/// duplicated letters, or a correct letter with no matching option).
pub fn parse_lesson_content(raw: &str) -> Result<LessonContent, LessonLoadError> {
    let content = serde_json::from_str::<LessonContent>(raw)
        .map_err(|err| LessonLoadError::Malformed(err.to_string()))?;
    validate_lesson_content(&content)?;
    Ok(content)
}

/// Checks lesson shape rules shared by generated and archived content.
///
/// # Errors
///
/// Returns [`LessonLoadError::Invalid`] describing the first violated rule.
pub fn validate_lesson_content(content: &LessonContent) -> Result<(), LessonLoadError> {
    if content.title.trim().is_empty() {
        return Err(LessonLoadError::Invalid("lesson title is empty".to_string()));
    }

    for (index, quiz) in content.quizzes.iter().enumerate() {
        let number = index + 1;
        if quiz.options.len() != QUIZ_OPTION_COUNT {
            return Err(LessonLoadError::Invalid(format!(
                "question {number} has {} options, expected {QUIZ_OPTION_COUNT}",
                quiz.options.len()
            )));
        }
        let mut letters: Vec<QuizLetter> = quiz.options.iter().map(|opt| opt.letter).collect();
        letters.sort();
        letters.dedup();
        if letters.len() != QUIZ_OPTION_COUNT {
            return Err(LessonLoadError::Invalid(format!(
                "question {number} repeats an option letter"
            )));
        }
        if !letters.contains(&quiz.correct_letter) {
            return Err(LessonLoadError::Invalid(format!(
                "question {number} marks a missing option as correct"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_json(correct: &str) -> String {
        format!(
            r#"{{
                "title": "Signals",
                "objectives": ["I will be able to name a signal"],
                "content": "Signals carry data.",
                "detailedNotes": "Deep dive.",
                "quizzes": [{{
                    "question": "What carries data?",
                    "options": [
                        {{"letter": "A", "text": "Signals"}},
                        {{"letter": "B", "text": "Noise"}},
                        {{"letter": "C", "text": "Rocks"}},
                        {{"letter": "D", "text": "Fog"}}
                    ],
                    "correctLetter": "{correct}"
                }}]
            }}"#
        )
    }

    #[test]
    fn parses_generator_document_with_content_alias() {
        let lesson = parse_lesson_content(&sample_json("A")).expect("valid lesson");

        assert_eq!(lesson.title, "Signals");
        assert_eq!(lesson.body, "Signals carry data.");
        assert_eq!(lesson.detailed_notes.as_deref(), Some("Deep dive."));
        assert_eq!(lesson.quizzes[0].correct_letter, QuizLetter::A);
    }

    #[test]
    fn rejects_non_json_as_malformed() {
        let err = parse_lesson_content("not a lesson").unwrap_err();
        assert!(matches!(err, LessonLoadError::Malformed(_)));
    }

    #[test]
    fn rejects_duplicate_option_letters() {
        let raw = sample_json("A").replace(r#""letter": "D""#, r#""letter": "C""#);
        let err = parse_lesson_content(&raw).unwrap_err();
        assert_eq!(
            err,
            LessonLoadError::Invalid("question 1 repeats an option letter".to_string())
        );
    }

    #[test]
    fn rejects_blank_title() {
        let raw = sample_json("B").replace(r#""title": "Signals""#, r#""title": "  ""#);
        assert!(matches!(
            parse_lesson_content(&raw),
            Err(LessonLoadError::Invalid(_))
        ));
    }

    #[test]
    fn archived_lesson_falls_back_to_first_entry() {
        let lesson = parse_lesson_content(&sample_json("C")).unwrap();
        let mut module = LessonModule {
            id: "rust-basics".to_string(),
            title: "Rust Basics".to_string(),
            icon: "book".to_string(),
            lessons_finished: 4,
            total_lessons: CURRICULUM_LENGTH,
            archive: vec![lesson.clone()],
        };

        assert_eq!(module.next_lesson_number(), 5);
        assert_eq!(module.archived_lesson(), Some(&lesson));

        module.archive.clear();
        assert_eq!(module.archived_lesson(), None);
    }

    #[test]
    fn tiers_follow_curriculum_bands() {
        assert_eq!(LessonTier::for_lesson(1), LessonTier::Foundational);
        assert_eq!(LessonTier::for_lesson(3), LessonTier::Foundational);
        assert_eq!(LessonTier::for_lesson(4), LessonTier::Intermediate);
        assert_eq!(LessonTier::for_lesson(8), LessonTier::Intermediate);
        assert_eq!(LessonTier::for_lesson(12), LessonTier::Advanced);
    }

    #[test]
    fn offline_loader_always_reports_offline() {
        let query = LessonQuery {
            module_id: "m".to_string(),
            module_title: "M".to_string(),
            lesson_number: 1,
            learner_level: 1,
        };
        let result = futures::executor::block_on(OfflineLessonLoader.load_lesson_content(query));
        assert_eq!(result, Err(LessonLoadError::Offline));
    }
}
