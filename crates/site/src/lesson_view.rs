//! Window body for lesson modules: renders the current lesson session for its window.

use leptos::*;
use lesson_contract::LessonTier;
use studydesk_runtime::{
    host::window_primary_input_dom_id, use_desktop_runtime, ContentSource, LessonStep, WindowId,
};

fn source_label(source: Option<ContentSource>) -> &'static str {
    match source {
        Some(ContentSource::Remote) => "Generated lesson",
        Some(ContentSource::LocalArchive) => "Offline lesson",
        None => "",
    }
}

fn tier_label(tier: Option<LessonTier>) -> &'static str {
    match tier {
        Some(LessonTier::Foundational) => "Foundations",
        Some(LessonTier::Intermediate) => "Intermediate",
        Some(LessonTier::Advanced) => "Advanced",
        None => "",
    }
}

#[component]
pub(crate) fn LessonView(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let input_id = window_primary_input_dom_id(&window_id);
    let id = store_value(window_id);

    let session = create_memo(move |_| {
        runtime.store.with(|store| {
            let lesson = &store.state().lesson;
            (lesson.module_id.as_ref() == Some(&id.get_value())).then(|| lesson.clone())
        })
    });

    view! {
        <article class="lesson-view">
            {move || match session.get() {
                None => view! {
                    <p class="lesson-idle">"Another module holds the lesson session. Reopen this one to continue."</p>
                }
                .into_view(),
                Some(lesson) if lesson.step == LessonStep::Loading => view! {
                    <div class="lesson-loading">
                        <p>"Preparing your lesson..."</p>
                        <button on:click=move |_| {
                            runtime.with_store(|store| store.force_local_archive());
                        }>
                            "Use offline lesson"
                        </button>
                    </div>
                }
                .into_view(),
                Some(lesson) if lesson.step == LessonStep::Error => view! {
                    <p class="lesson-error">
                        {lesson.error.unwrap_or_else(|| "Lesson unavailable.".to_string())}
                    </p>
                }
                .into_view(),
                Some(lesson) => {
                    let badge = source_label(lesson.source);
                    let tier = tier_label(lesson.tier);
                    match lesson.content {
                        Some(content) => view! {
                            <header>
                                <h1>{content.title}</h1>
                                <span class="lesson-source">{badge}</span>
                                <span class="lesson-tier">{tier}</span>
                            </header>
                            <ul class="lesson-objectives">
                                {content
                                    .objectives
                                    .into_iter()
                                    .map(|objective| view! { <li>{objective}</li> })
                                    .collect_view()}
                            </ul>
                            <div class="lesson-body">{content.body}</div>
                            <p class="lesson-quiz-count">
                                {format!("{} quiz question(s)", content.quizzes.len())}
                            </p>
                        }
                        .into_view(),
                        None => ().into_view(),
                    }
                }
            }}
            <textarea id=input_id class="lesson-notes" placeholder="Your notes"></textarea>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn badge_names_content_origin() {
        assert_eq!(source_label(Some(ContentSource::Remote)), "Generated lesson");
        assert_eq!(source_label(Some(ContentSource::LocalArchive)), "Offline lesson");
        assert_eq!(source_label(None), "");
    }

    #[test]
    fn tier_label_follows_session_tier() {
        assert_eq!(tier_label(Some(LessonTier::Foundational)), "Foundations");
        assert_eq!(tier_label(Some(LessonTier::Advanced)), "Advanced");
        assert_eq!(tier_label(None), "");
    }
}
