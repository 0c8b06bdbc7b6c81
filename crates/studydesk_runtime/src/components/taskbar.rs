use super::*;
use crate::taskbar::{TaskbarEntry, TaskbarIntent};

fn taskbar_button_class(entry: &TaskbarEntry) -> &'static str {
    match (entry.is_active, entry.minimized) {
        (_, true) => "taskbar-app minimized",
        (true, false) => "taskbar-app active",
        (false, false) => "taskbar-app",
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;

    let entries = create_memo(move |_| store.with(|store| store.taskbar()));
    let start_open = move || store.with(|store| store.state().start_menu_open);

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <button
                id="taskbar-start-button"
                class="taskbar-start"
                aria-haspopup="menu"
                aria-expanded=move || start_open().to_string()
                on:mousedown=move |ev| ev.stop_propagation()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.with_store(|store| store.toggle_start_menu());
                }
            >
                "Start"
            </button>
            <div class="taskbar-running" role="list">
                <For each=move || entries.get() key=|entry| entry.id.clone() let:entry>
                    <TaskbarButton window_id=entry.id entries=entries />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarButton(window_id: WindowId, entries: Memo<Vec<TaskbarEntry>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(window_id);
    let entry = move || {
        entries.with(|entries| {
            entries
                .iter()
                .find(|entry| entry.id == id.get_value())
                .cloned()
        })
    };
    let intent = move |intent: TaskbarIntent| {
        runtime.with_store(|store| store.apply_taskbar_intent(id.get_value().as_str(), intent));
    };

    view! {
        <div class="taskbar-item" role="listitem">
            <button
                id=move || taskbar_button_dom_id(&id.get_value())
                class=move || entry().map(|entry| taskbar_button_class(&entry)).unwrap_or("taskbar-app")
                title=move || entry().map(|entry| entry.hint()).unwrap_or_default()
                aria-pressed=move || entry().is_some_and(|entry| entry.is_active).to_string()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    intent(TaskbarIntent::Primary);
                }
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    intent(TaskbarIntent::DoubleClick);
                }
            >
                {move || entry().map(|entry| view! { <AppGlyph icon_id=entry.icon_id /> })}
                <span>{move || entry().map(|entry| entry.title).unwrap_or_default()}</span>
            </button>
            <button
                class="taskbar-close"
                aria-label="Close window"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    intent(TaskbarIntent::Close);
                }
                on:dblclick=move |ev| stop_mouse_event(&ev)
            >
                "\u{00d7}"
            </button>
        </div>
    }
}
