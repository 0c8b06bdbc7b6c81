//! Lesson-session bookkeeping and content resolution against the external loader.
//!
//! The reducer owns the session scalars; the host drives [`resolve_lesson_content`] on the UI
//! executor and feeds the outcome back as a ticketed action, so a result that arrives after the
//! window closed (or after a newer load started) is recognized as stale.

use lesson_contract::{LessonContent, LessonContentLoader, LessonQuery};

use crate::model::{ContentSource, LessonSession, LessonStep, WindowId};

/// Lesson details resolved by the launch router for a module id.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonLaunch {
    pub module_title: String,
    pub lesson_number: u32,
    pub learner_level: u32,
    pub archived: Option<LessonContent>,
}

/// Work order emitted to the host when a lesson module is freshly opened.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonLoadRequest {
    pub ticket: u64,
    pub query: LessonQuery,
    pub remote_enabled: bool,
    pub archived: Option<LessonContent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonOutcome {
    Loaded {
        content: LessonContent,
        source: ContentSource,
    },
    Unavailable {
        reason: String,
    },
}

impl LessonOutcome {
    fn from_archive(archived: Option<LessonContent>, reason: impl Into<String>) -> Self {
        match archived {
            Some(content) => Self::Loaded {
                content,
                source: ContentSource::LocalArchive,
            },
            None => Self::Unavailable {
                reason: reason.into(),
            },
        }
    }
}

/// Resets the session for a fresh open of `module_id` and issues a new load ticket.
pub(crate) fn begin_session(
    session: &mut LessonSession,
    module_id: WindowId,
    launch: LessonLaunch,
) -> LessonLoadRequest {
    let ticket = session.next_ticket;
    session.next_ticket += 1;

    session.module_id = Some(module_id.clone());
    session.step = LessonStep::Loading;
    session.quiz_index = 0;
    session.score = 0;
    session.content = None;
    session.source = None;
    session.error = None;
    session.pending_ticket = Some(ticket);

    let query = LessonQuery {
        module_id: module_id.0,
        module_title: launch.module_title,
        lesson_number: launch.lesson_number,
        learner_level: launch.learner_level,
    };
    session.tier = Some(query.tier());

    LessonLoadRequest {
        ticket,
        query,
        remote_enabled: session.remote_enabled,
        archived: launch.archived,
    }
}

/// Stores a resolved outcome; the caller has already checked the ticket is current.
pub(crate) fn apply_outcome(session: &mut LessonSession, outcome: LessonOutcome) {
    session.pending_ticket = None;
    match outcome {
        LessonOutcome::Loaded { content, source } => {
            session.content = Some(content);
            session.source = Some(source);
            session.error = None;
            session.step = LessonStep::Lesson;
        }
        LessonOutcome::Unavailable { reason } => {
            session.content = None;
            session.source = None;
            session.error = Some(reason);
            session.step = LessonStep::Error;
        }
    }
}

/// Fetches lesson content for `request`, falling back to the archived lesson on any failure.
///
/// Never fails: a rejected generator call degrades to local content, and only a module with no
/// archive yields [`LessonOutcome::Unavailable`].
pub async fn resolve_lesson_content(
    loader: &dyn LessonContentLoader,
    request: &LessonLoadRequest,
) -> LessonOutcome {
    if !request.remote_enabled {
        return LessonOutcome::from_archive(
            request.archived.clone(),
            "remote lessons are disabled and no archived lesson exists",
        );
    }

    match loader.load_lesson_content(request.query.clone()).await {
        Ok(content) => LessonOutcome::Loaded {
            content,
            source: ContentSource::Remote,
        },
        Err(err) => {
            leptos::logging::warn!(
                "lesson load for `{}` failed, using local archive: {err}",
                request.query.module_id
            );
            LessonOutcome::from_archive(request.archived.clone(), err.to_string())
        }
    }
}
