//! Desktop shell UI composition and interaction surfaces.

mod a11y;
mod menus;
mod sidebar;
mod taskbar;
mod window;

use leptos::*;

use self::{menus::StartMenu, sidebar::NavigationRail, taskbar::Taskbar, window::DesktopWindow};
use crate::{
    catalog::desktop_icon_apps,
    host::{sidebar_attribute_value, SHELL_ROOT_DOM_ID},
    model::{InteractionState, PointerPosition, ResizeEdge, WindowId},
    router::LaunchTarget,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
fn AppGlyph(#[prop(into)] icon_id: String) -> impl IntoView {
    view! { <span class="app-glyph" data-icon=icon_id aria-hidden="true"></span> }
}

#[component]
/// Renders the full desktop shell UI and processes pointer gestures globally.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;

    let resize_listener = window_event_listener(ev::resize, move |_| {
        let viewport = runtime.host.get_value().viewport_size();
        runtime.with_store(|store| store.set_viewport(viewport.width, viewport.height));
    });
    on_cleanup(move || resize_listener.remove());

    // Pointer moves are tracked on the window so a fast drag cannot outrun the title bar.
    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if !runtime.gesture_armed() {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        runtime.with_store(|store| store.update_gesture(pointer));
    });
    on_cleanup(move || move_listener.remove());

    let up_listener = window_event_listener(ev::pointerup, move |_| end_gesture(runtime));
    on_cleanup(move || up_listener.remove());
    let cancel_listener = window_event_listener(ev::pointercancel, move |_| end_gesture(runtime));
    on_cleanup(move || cancel_listener.remove());

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        if store.with_untracked(|store| store.state().start_menu_open) {
            ev.prevent_default();
            close_start_menu(runtime);
            let _ = a11y::focus_element_by_id(SHELL_ROOT_DOM_ID);
        }
    });
    on_cleanup(move || escape_listener.remove());

    let open_ids = move || {
        store.with(|store| {
            store
                .state()
                .open_windows()
                .map(|window| window.id.clone())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div
            id=SHELL_ROOT_DOM_ID
            data-sidebar=sidebar_attribute_value(store.with_untracked(|store| store.sidebar_hidden()))
            class="desktop-shell"
            tabindex="-1"
            data-layout=move || if store.with(|store| store.is_narrow()) { "narrow" } else { "wide" }
            data-gesture=move || store.with(|store| gesture_attribute_value(store.interaction()))
        >
            <NavigationRail />
            <div
                class="desktop-surface"
                on:mousedown=move |_| close_start_menu(runtime)
            >
                <div class="desktop-icon-grid">
                    <For each=desktop_icon_apps key=|app| app.app_id let:app>
                        <button
                            class="desktop-icon"
                            on:dblclick=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.with_store(|store| store.launch(LaunchTarget::new(app.app_id)));
                            }
                        >
                            <AppGlyph icon_id=app.icon_id />
                            <span>{app.title}</span>
                        </button>
                    </For>
                </div>

                <div class="desktop-window-layer">
                    <For each=open_ids key=|id| id.clone() let:window_id>
                        <DesktopWindow window_id=window_id />
                    </For>
                </div>
            </div>

            <StartMenu />
            <Taskbar />
        </div>
    }
}

fn close_start_menu(runtime: DesktopRuntimeContext) {
    if runtime
        .store
        .with_untracked(|store| store.state().start_menu_open)
    {
        runtime.with_store(|store| store.close_start_menu());
    }
}

fn end_gesture(runtime: DesktopRuntimeContext) {
    if runtime.gesture_armed() {
        runtime.with_store(|store| store.end_gesture());
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

fn gesture_attribute_value(interaction: &InteractionState) -> &'static str {
    if interaction.is_dragging() {
        "drag"
    } else if interaction.is_resizing() {
        "resize"
    } else {
        "idle"
    }
}

fn taskbar_button_dom_id(window_id: &WindowId) -> String {
    format!("taskbar-window-button-{}", window_id.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{GestureKind, GestureSession, WindowRect};

    #[test]
    fn every_resize_edge_has_distinct_class() {
        let mut classes: Vec<_> = ResizeEdge::ALL.iter().map(|e| resize_edge_class(*e)).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), ResizeEdge::ALL.len());
    }

    #[test]
    fn gesture_attribute_tracks_armed_gesture() {
        let mut interaction = InteractionState::default();
        assert_eq!(gesture_attribute_value(&interaction), "idle");

        let rect = WindowRect {
            x: 0,
            y: 0,
            w: 400,
            h: 300,
        };
        interaction.gesture = Some(GestureSession {
            window_id: WindowId::from("calc"),
            kind: GestureKind::Resize(ResizeEdge::SouthEast),
            pointer_start: PointerPosition { x: 10, y: 10 },
            rect_start: rect,
        });
        assert_eq!(gesture_attribute_value(&interaction), "resize");

        if let Some(gesture) = interaction.gesture.as_mut() {
            gesture.kind = GestureKind::Drag;
        }
        assert_eq!(gesture_attribute_value(&interaction), "drag");
    }

    #[test]
    fn taskbar_button_ids_embed_window_id() {
        assert_eq!(
            taskbar_button_dom_id(&WindowId::from("calc")),
            "taskbar-window-button-calc"
        );
    }
}
