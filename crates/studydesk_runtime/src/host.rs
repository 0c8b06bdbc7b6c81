//! Host-side runtime helpers for executing store effects and querying browser environment state.
//!
//! Effect execution and viewport queries live behind [`DesktopHostContext`] so the store and
//! reducer stay free of browser APIs.

use std::rc::Rc;

use leptos::{logging, spawn_local};
use lesson_contract::LessonContentLoader;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    lesson::{resolve_lesson_content, LessonLoadRequest},
    model::{ViewportSize, WindowId},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

/// DOM id of the element wrapping the whole desktop shell.
pub const SHELL_ROOT_DOM_ID: &str = "desktop-shell-root";

/// Value of the shell root's `data-sidebar` attribute for a sidebar hidden flag.
pub fn sidebar_attribute_value(hidden: bool) -> &'static str {
    if hidden {
        "hidden"
    } else {
        "shown"
    }
}

/// DOM id a window body gives its primary text field to receive focus on activation.
pub fn window_primary_input_dom_id(window_id: &WindowId) -> String {
    format!("window-primary-input-{}", window_id.as_str())
}

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    lesson_loader: Rc<dyn LessonContentLoader>,
}

impl DesktopHostContext {
    pub fn new(lesson_loader: Rc<dyn LessonContentLoader>) -> Self {
        Self { lesson_loader }
    }

    /// Returns the configured lesson content loader.
    pub fn lesson_loader(&self) -> Rc<dyn LessonContentLoader> {
        self.lesson_loader.clone()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the store.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindowInput(window_id) => focus_window_input(window_id),
            RuntimeEffect::LoadLessonContent(request) => self.load_lesson(runtime, request),
            RuntimeEffect::SidebarVisibilityChanged { hidden } => mark_sidebar_visibility(hidden),
        }
    }

    /// Resolves a lesson load off the event loop and hands the outcome back to the store.
    ///
    /// The window may close before the loader settles; the store then rejects the ticket as stale.
    fn load_lesson(&self, runtime: DesktopRuntimeContext, request: LessonLoadRequest) {
        let loader = self.lesson_loader();
        spawn_local(async move {
            let outcome = resolve_lesson_content(loader.as_ref(), &request).await;
            logging::log!(
                "lesson load {} for `{}` settled",
                request.ticket,
                request.query.module_id
            );
            runtime.with_store(|store| store.resolve_lesson(request.ticket, outcome));
        });
    }

    /// Returns the browser viewport size, or the default size off-browser.
    pub fn viewport_size(&self) -> ViewportSize {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                    value.ok().and_then(|value| value.as_f64()).map(|v| v as i32)
                };
                let fallback = ViewportSize::default();
                return ViewportSize {
                    width: dimension(window.inner_width()).unwrap_or(fallback.width),
                    height: dimension(window.inner_height()).unwrap_or(fallback.height),
                };
            }
        }

        ViewportSize::default()
    }
}

fn mark_sidebar_visibility(hidden: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(SHELL_ROOT_DOM_ID))
        else {
            return;
        };
        let _ = root.set_attribute("data-sidebar", sidebar_attribute_value(hidden));
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = hidden;
}

fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(element) = window
            .document()
            .and_then(|document| document.get_element_by_id(&window_primary_input_dom_id(&window_id)))
        else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        // Defer until the window has been painted at its new stacking position.
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}
