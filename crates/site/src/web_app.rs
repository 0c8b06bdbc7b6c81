use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use lesson_contract::{parse_lesson_content, LessonModule, OfflineLessonLoader, CURRICULUM_LENGTH};
use studydesk_runtime::{
    host::window_primary_input_dom_id, DesktopProvider, DesktopShell, ShellConfig, WindowId,
};

use crate::lesson_view::LessonView;

const SHELL_CONFIG_JSON: &str = include_str!("shell_config.json");

const ATOMS_LESSON: &str = r#"{
    "title": "What Is an Atom?",
    "objectives": ["I will be able to name the three subatomic particles"],
    "content": "Atoms are built from protons, neutrons, and electrons.",
    "quizzes": [{
        "question": "Which particle carries a negative charge?",
        "options": [
            {"letter": "A", "text": "Proton"},
            {"letter": "B", "text": "Neutron"},
            {"letter": "C", "text": "Electron"},
            {"letter": "D", "text": "Photon"}
        ],
        "correctLetter": "C"
    }]
}"#;

const LOOPS_LESSON: &str = r#"{
    "title": "Counting With Loops",
    "objectives": ["I will be able to repeat an action a fixed number of times"],
    "content": "A loop runs the same block of code while a condition holds."
}"#;

fn module(id: &str, title: &str, icon: &str, archive: &[&str]) -> LessonModule {
    let archive = archive
        .iter()
        .filter_map(|raw| match parse_lesson_content(raw) {
            Ok(lesson) => Some(lesson),
            Err(err) => {
                logging::warn!("skipping archived lesson for `{id}`: {err}");
                None
            }
        })
        .collect();
    LessonModule {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        lessons_finished: 0,
        total_lessons: CURRICULUM_LENGTH,
        archive,
    }
}

/// Modules shipped with the offline build.
pub fn sample_modules() -> Vec<LessonModule> {
    vec![
        module("chemistry-101", "Chemistry Basics", "flask", &[ATOMS_LESSON]),
        module("coding-101", "First Steps in Code", "code", &[LOOPS_LESSON]),
    ]
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Study Desk" />
        <Meta name="description" content="A desktop-style study environment in the browser." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let config = ShellConfig::from_json_or_default(SHELL_CONFIG_JSON);
    let modules = sample_modules();
    let module_ids: Vec<String> = modules.iter().map(|module| module.id.clone()).collect();
    let window_content = Callback::new(move |window_id: WindowId| {
        if module_ids.iter().any(|id| id == window_id.as_str()) {
            view! { <LessonView window_id=window_id /> }.into_view()
        } else {
            view! { <PlaceholderApp window_id=window_id /> }.into_view()
        }
    });

    view! {
        <DesktopProvider
            lesson_loader=Rc::new(OfflineLessonLoader)
            window_content=window_content
            config=config
            modules=modules
        >
            <DesktopShell />
        </DesktopProvider>
    }
}

#[component]
fn PlaceholderApp(window_id: WindowId) -> impl IntoView {
    let input_id = window_primary_input_dom_id(&window_id);
    view! {
        <section class="placeholder-app">
            <p>{format!("`{window_id}` has no content in this build.")}</p>
            <input id=input_id type="text" placeholder="Notes" />
        </section>
    }
}
