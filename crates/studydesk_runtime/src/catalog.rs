//! Launch catalogs: the static installed-app registry and the dynamic lesson-module list.

use std::rc::Rc;

use lesson_contract::LessonModule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: &'static str,
    pub title: &'static str,
    pub icon_id: &'static str,
    pub show_in_launcher: bool,
    pub show_on_desktop: bool,
}

const APP_REGISTRY: [AppDescriptor; 10] = [
    AppDescriptor {
        app_id: "dashboard",
        title: "Dashboard",
        icon_id: "chart-pie",
        show_in_launcher: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: "profile",
        title: "Profile",
        icon_id: "user-circle",
        show_in_launcher: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: "calc",
        title: "Calculator",
        icon_id: "calculator",
        show_in_launcher: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: "mindmap",
        title: "Mind Mapper",
        icon_id: "brain",
        show_in_launcher: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: "calendar",
        title: "Calendar",
        icon_id: "calendar-days",
        show_in_launcher: true,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: "settings",
        title: "Settings",
        icon_id: "cog",
        show_in_launcher: true,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: "timer",
        title: "Focus Timer",
        icon_id: "clock",
        show_in_launcher: true,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: "assistant",
        title: "Study Assistant",
        icon_id: "robot",
        show_in_launcher: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: "control-panel",
        title: "Control Center",
        icon_id: "sliders",
        show_in_launcher: false,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: "help",
        title: "User Manual",
        icon_id: "circle-info",
        show_in_launcher: true,
        show_on_desktop: false,
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

pub fn launcher_apps() -> Vec<AppDescriptor> {
    app_registry()
        .iter()
        .copied()
        .filter(|entry| entry.show_in_launcher)
        .collect()
}

pub fn desktop_icon_apps() -> Vec<AppDescriptor> {
    app_registry()
        .iter()
        .copied()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Default display metadata for a launchable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub icon_id: String,
}

/// Synchronous id lookup against a source of launchable entities.
pub trait Catalog {
    fn resolve(&self, id: &str) -> Option<CatalogEntry>;
}

/// Catalog over a fixed descriptor table, normally [`app_registry`].
#[derive(Debug, Clone, Copy)]
pub struct AppCatalog {
    entries: &'static [AppDescriptor],
}

impl AppCatalog {
    pub fn new(entries: &'static [AppDescriptor]) -> Self {
        Self { entries }
    }
}

impl Default for AppCatalog {
    fn default() -> Self {
        Self::new(app_registry())
    }
}

impl Catalog for AppCatalog {
    fn resolve(&self, id: &str) -> Option<CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.app_id == id)
            .map(|entry| CatalogEntry {
                title: entry.title.to_string(),
                icon_id: entry.icon_id.to_string(),
            })
    }
}

/// Lesson modules the learner can open; replaced wholesale when the content engine changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCatalog {
    modules: Vec<LessonModule>,
}

impl ModuleCatalog {
    pub fn new(modules: Vec<LessonModule>) -> Self {
        Self { modules }
    }

    pub fn module(&self, id: &str) -> Option<&LessonModule> {
        self.modules.iter().find(|module| module.id == id)
    }

    pub fn modules(&self) -> &[LessonModule] {
        &self.modules
    }
}

impl Catalog for ModuleCatalog {
    fn resolve(&self, id: &str) -> Option<CatalogEntry> {
        self.module(id).map(|module| CatalogEntry {
            title: module.title.clone(),
            icon_id: module.icon.clone(),
        })
    }
}

/// The two catalogs the launch router consults, modules first.
#[derive(Clone)]
pub struct LaunchCatalogs {
    pub apps: Rc<dyn Catalog>,
    pub modules: ModuleCatalog,
}

impl LaunchCatalogs {
    pub fn new(apps: Rc<dyn Catalog>, modules: ModuleCatalog) -> Self {
        Self { apps, modules }
    }

    pub fn resolve(&self, id: &str) -> Option<CatalogEntry> {
        self.modules.resolve(id).or_else(|| self.apps.resolve(id))
    }
}

impl Default for LaunchCatalogs {
    fn default() -> Self {
        Self::new(Rc::new(AppCatalog::default()), ModuleCatalog::default())
    }
}

impl std::fmt::Debug for LaunchCatalogs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchCatalogs")
            .field("modules", &self.modules.modules().len())
            .finish_non_exhaustive()
    }
}
