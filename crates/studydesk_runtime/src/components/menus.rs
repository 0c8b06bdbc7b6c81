use super::*;
use crate::catalog::launcher_apps;

const START_MENU_ID: &str = "desktop-start-menu";

fn start_item_id(id: &str) -> String {
    format!("{START_MENU_ID}-item-{id}")
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;

    let is_open = move || store.with(|store| store.state().start_menu_open);
    let remote_enabled = move || store.with(|store| store.state().lesson.remote_enabled);
    let modules = create_memo(move |_| {
        store.with(|store| {
            store
                .catalogs()
                .modules
                .modules()
                .iter()
                .map(|module| (module.id.clone(), module.title.clone()))
                .collect::<Vec<_>>()
        })
    });

    create_effect(move |was_open: Option<bool>| {
        let open = is_open();
        if open && was_open != Some(true) {
            if let Some(first) = launcher_apps().first() {
                let _ = a11y::focus_element_by_id(&start_item_id(first.app_id));
            }
        }
        open
    });

    let launch = move |id: String| {
        runtime.with_store(|store| store.launch(LaunchTarget::new(id)));
    };

    view! {
        <Show when=is_open fallback=|| ()>
            <div
                id=START_MENU_ID
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:mousedown=move |ev| ev.stop_propagation()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    let _ = a11y::handle_menu_keydown(&ev, START_MENU_ID);
                }
            >
                <div class="start-menu-group-label">"Apps"</div>
                {launcher_apps()
                    .into_iter()
                    .map(|app| {
                        view! {
                            <button
                                id=start_item_id(app.app_id)
                                role="menuitem"
                                class="start-menu-item"
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    launch(app.app_id.to_string());
                                }
                            >
                                <AppGlyph icon_id=app.icon_id />
                                <span>{app.title}</span>
                            </button>
                        }
                    })
                    .collect_view()}

                <div class="start-menu-group-label">"Modules"</div>
                <For each=move || modules.get() key=|(id, _)| id.clone() let:module>
                    {{
                        let (module_id, title) = module;
                        let target = LaunchTarget::new(module_id.clone()).with_title(title.clone());
                        view! {
                            <button
                                id=start_item_id(&module_id)
                                role="menuitem"
                                class="start-menu-item"
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    let target = target.clone();
                                    runtime.with_store(|store| store.launch(target));
                                }
                            >
                                {title}
                            </button>
                        }
                    }}
                </For>

                <div class="start-menu-separator" role="separator" aria-hidden="true"></div>
                <button
                    id=start_item_id("lesson-source")
                    role="menuitem"
                    class="start-menu-item"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        if store.with_untracked(|store| store.state().lesson.remote_enabled) {
                            runtime.with_store(|store| store.force_local_archive());
                        } else {
                            runtime.with_store(|store| store.set_remote_content(true));
                        }
                    }
                >
                    {move || {
                        if remote_enabled() {
                            "Use offline lessons"
                        } else {
                            "Use generated lessons"
                        }
                    }}
                </button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn item_ids_are_namespaced_under_menu() {
        assert_eq!(start_item_id("calc"), "desktop-start-menu-item-calc");
    }
}
