use super::*;

/// Left navigation rail listing the dashboard and lesson modules.
#[component]
pub(super) fn NavigationRail() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;

    let hidden = move || store.with(|store| store.sidebar_hidden());
    let modules = create_memo(move |_| {
        store.with(|store| {
            store
                .catalogs()
                .modules
                .modules()
                .iter()
                .map(|module| (module.id.clone(), module.title.clone(), module.icon.clone()))
                .collect::<Vec<_>>()
        })
    });
    let dashboard_id = store.with_untracked(|store| store.config().sidebar_exempt_window.clone());

    view! {
        <nav
            class="navigation-rail"
            aria-label="Navigation"
            data-hidden=move || hidden().to_string()
            aria-hidden=move || hidden().to_string()
        >
            <button
                class="rail-item"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    let target = LaunchTarget::new(dashboard_id.clone());
                    runtime.with_store(|store| store.launch(target));
                }
            >
                "Dashboard"
            </button>
            <div class="rail-group-label">"Modules"</div>
            <For each=move || modules.get() key=|(id, _, _)| id.clone() let:module>
                {{
                    let (module_id, title, icon) = module;
                    let target = LaunchTarget::new(module_id)
                        .with_title(title.clone())
                        .with_icon(icon.clone());
                    view! {
                        <button
                            class="rail-item"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                let target = target.clone();
                                runtime.with_store(|store| store.launch(target));
                            }
                        >
                            <AppGlyph icon_id=icon />
                            <span>{title}</span>
                        </button>
                    }
                }}
            </For>
        </nav>
    }
}
