use super::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    let Some(target) = ev.current_target() else {
        return;
    };
    if let Ok(element) = target.dyn_into::<web_sys::Element>() {
        let _ = element.set_pointer_capture(ev.pointer_id());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Primary button for mice, primary contact for touch and pen.
fn is_primary_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn frame_style(frame: &crate::window_manager::WindowFrame) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        frame.rect.x, frame.rect.y, frame.rect.w, frame.rect.h, frame.z_index
    )
}

fn frame_class(frame: &crate::window_manager::WindowFrame) -> String {
    let mut class = String::from("desktop-window");
    for (flag, name) in [
        (frame.is_active, " active"),
        (frame.minimized, " minimized"),
        (frame.maximized, " maximized"),
    ] {
        if flag {
            class.push_str(name);
        }
    }
    class
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(window_id);

    let frame = create_memo(move |_| runtime.store.with(|store| store.frame(&id.get_value())));
    let title = create_memo(move |_| {
        runtime.store.with(|store| {
            store
                .state()
                .window(&id.get_value())
                .map(|window| (window.title.clone(), window.icon_id.clone()))
                .unwrap_or_default()
        })
    });

    let focus = move |_: web_sys::PointerEvent| {
        let needs_focus = frame
            .get_untracked()
            .is_some_and(|frame| !frame.is_active || frame.minimized);
        if needs_focus {
            runtime.with_store(|store| store.focus(id.get_value().as_str()));
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        let pointer = pointer_from_pointer_event(&ev);
        runtime.with_store(|store| store.begin_drag(id.get_value().as_str(), pointer));
    };
    let toggle_maximize =
        move || runtime.with_store(|store| store.toggle_maximize(id.get_value().as_str()));

    let is_maximized = move || frame.with(|frame| frame.as_ref().is_some_and(|f| f.maximized));
    let handles_enabled =
        move || frame.with(|frame| frame.as_ref().is_some_and(|f| f.handles_enabled));
    let content = runtime.window_content.call(id.get_value());

    view! {
        <section
            class=move || frame.with(|frame| frame.as_ref().map(frame_class).unwrap_or_default())
            style=move || frame.with(|frame| frame.as_ref().map(frame_style).unwrap_or_default())
            on:pointerdown=focus
            role="dialog"
            aria-label=move || title.with(|(title, _)| title.clone())
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <div class="titlebar-title">
                    {move || view! { <AppGlyph icon_id=title.with(|(_, icon)| icon.clone()) /> }}
                    <span>{move || title.with(|(title, _)| title.clone())}</span>
                    <small class="titlebar-subtitle">
                        {move || frame.with(|frame| frame.as_ref().map(|f| f.subtitle).unwrap_or_default())}
                    </small>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.with_store(|store| store.minimize(id.get_value().as_str()));
                        }
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || if is_maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        {move || if is_maximized() { "\u{2750}" } else { "\u{25a1}" }}
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.with_store(|store| store.close(id.get_value().as_str()));
                        }
                    >
                        "\u{00d7}"
                    </button>
                </div>
            </header>
            <div class="window-body">{content}</div>
            <Show when=handles_enabled fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=id.get_value() edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        let pointer = pointer_from_pointer_event(&ev);
        runtime.with_store(|store| store.begin_resize(window_id.as_str(), edge, pointer));
    };

    view! { <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown /> }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::WindowRect, window_manager::WindowFrame};

    fn frame() -> WindowFrame {
        WindowFrame {
            rect: WindowRect {
                x: 10,
                y: 20,
                w: 800,
                h: 550,
            },
            z_index: 5101,
            is_active: true,
            minimized: false,
            maximized: true,
            handles_enabled: false,
            subtitle: "Primary Node",
        }
    }

    #[test]
    fn style_carries_rect_and_stacking() {
        assert_eq!(
            frame_style(&frame()),
            "left:10px;top:20px;width:800px;height:550px;z-index:5101;"
        );
    }

    #[test]
    fn class_lists_state_flags() {
        assert_eq!(frame_class(&frame()), "desktop-window active maximized");
    }
}
