//! Launch router: turns a raw id plus optional display hints into a fully resolved
//! [`LaunchRequest`].
//!
//! Title and icon fall back from explicit arguments to the module catalog, then the app catalog,
//! then the raw id and the configured generic icon. A catalog miss is never an error.

use crate::{
    catalog::LaunchCatalogs,
    config::ShellConfig,
    lesson::LessonLaunch,
    model::WindowId,
    reducer::LaunchRequest,
};

/// Caller-supplied launch arguments before catalog resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchTarget {
    pub id: String,
    pub title: Option<String>,
    pub icon_id: Option<String>,
    pub from_taskbar: bool,
}

impl LaunchTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon_id: impl Into<String>) -> Self {
        self.icon_id = Some(icon_id.into());
        self
    }

    pub fn from_taskbar(mut self) -> Self {
        self.from_taskbar = true;
        self
    }
}

pub fn route_launch(
    target: LaunchTarget,
    catalogs: &LaunchCatalogs,
    config: &ShellConfig,
    learner_level: u32,
) -> LaunchRequest {
    let entry = catalogs.resolve(&target.id);
    let title = target
        .title
        .filter(|title| !title.trim().is_empty())
        .or_else(|| entry.as_ref().map(|entry| entry.title.clone()))
        .unwrap_or_else(|| target.id.clone());
    let icon_id = target
        .icon_id
        .filter(|icon| !icon.trim().is_empty())
        .or_else(|| entry.map(|entry| entry.icon_id))
        .unwrap_or_else(|| config.generic_icon.clone());

    let lesson = catalogs.modules.module(&target.id).map(|module| LessonLaunch {
        module_title: module.title.clone(),
        lesson_number: module.next_lesson_number(),
        learner_level,
        archived: module.archived_lesson().cloned(),
    });

    LaunchRequest {
        window_id: WindowId::new(target.id),
        title,
        icon_id,
        from_taskbar: target.from_taskbar,
        lesson,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use lesson_contract::{LessonContent, LessonModule};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{AppCatalog, ModuleCatalog};

    fn archived(title: &str) -> LessonContent {
        LessonContent {
            title: title.to_string(),
            objectives: Vec::new(),
            body: String::new(),
            detailed_notes: None,
            quizzes: Vec::new(),
        }
    }

    fn catalogs() -> LaunchCatalogs {
        LaunchCatalogs::new(
            Rc::new(AppCatalog::default()),
            ModuleCatalog::new(vec![LessonModule {
                id: "chem".to_string(),
                title: "Chemistry".to_string(),
                icon: "flask".to_string(),
                lessons_finished: 1,
                total_lessons: 12,
                archive: vec![archived("Atoms"), archived("Bonds")],
            }]),
        )
    }

    #[test]
    fn explicit_arguments_win() {
        let request = route_launch(
            LaunchTarget::new("calc")
                .with_title("My Calc")
                .with_icon("abacus"),
            &catalogs(),
            &ShellConfig::default(),
            1,
        );
        assert_eq!(request.title, "My Calc");
        assert_eq!(request.icon_id, "abacus");
        assert_eq!(request.lesson, None);
    }

    #[test]
    fn app_catalog_fills_missing_metadata() {
        let request = route_launch(
            LaunchTarget::new("calc"),
            &catalogs(),
            &ShellConfig::default(),
            1,
        );
        assert_eq!(request.title, "Calculator");
        assert_eq!(request.icon_id, "calculator");
    }

    #[test]
    fn unknown_id_degrades_to_generic_entry() {
        let request = route_launch(
            LaunchTarget::new("mystery").from_taskbar(),
            &catalogs(),
            &ShellConfig::default(),
            1,
        );
        assert_eq!(request.title, "mystery");
        assert_eq!(request.icon_id, "cube");
        assert!(request.from_taskbar);
    }

    #[test]
    fn module_launch_carries_lesson_details() {
        let request = route_launch(
            LaunchTarget::new("chem"),
            &catalogs(),
            &ShellConfig::default(),
            4,
        );
        assert_eq!(request.title, "Chemistry");
        assert_eq!(request.icon_id, "flask");
        assert_eq!(
            request.lesson,
            Some(LessonLaunch {
                module_title: "Chemistry".to_string(),
                lesson_number: 2,
                learner_level: 4,
                archived: Some(archived("Bonds")),
            })
        );
    }
}
