//! Add/Edit Todo Dialog
//!
//! Form state behind the add/edit dialog. Saving yields a command; a blank
//! title yields nothing.

use nekotodo_lib::domain::{ChecklistItem, Todo};
use nekotodo_lib::viewmodel::TodoCommand;

#[derive(Debug, Clone, PartialEq)]
enum DialogMode {
    Add,
    Edit(Todo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoDialog {
    mode: DialogMode,
    pub title: String,
    pub description: String,
    /// One checklist entry per line
    pub checklist: String,
}

impl TodoDialog {
    pub fn for_new() -> Self {
        Self {
            mode: DialogMode::Add,
            title: String::new(),
            description: String::new(),
            checklist: String::new(),
        }
    }

    pub fn for_edit(todo: &Todo) -> Self {
        let checklist = todo
            .checklist
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            mode: DialogMode::Edit(todo.clone()),
            title: todo.title.clone(),
            description: todo.description.clone(),
            checklist,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DialogMode::Edit(_))
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            DialogMode::Add => "Add Todo",
            DialogMode::Edit(_) => "Edit Todo",
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_checklist(&mut self, checklist: impl Into<String>) {
        self.checklist = checklist.into();
    }

    /// Entries parsed from the checklist field, keeping done flags of lines
    /// that were already there
    fn parse_checklist(&self, previous: &[ChecklistItem]) -> Vec<ChecklistItem> {
        self.checklist
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ChecklistItem {
                text: line.to_string(),
                is_done: previous.iter().any(|p| p.text == line && p.is_done),
            })
            .collect()
    }

    /// Command for the save button, or None if the title is blank
    pub fn submit(&self) -> Option<TodoCommand> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let description = self.description.trim().to_string();

        match &self.mode {
            DialogMode::Add => {
                let mut todo = Todo::new(title).with_description(description);
                todo.checklist = self.parse_checklist(&[]);
                Some(TodoCommand::Add(todo))
            }
            DialogMode::Edit(original) => {
                let mut todo = original.clone();
                todo.title = title.to_string();
                todo.description = description;
                todo.checklist = self.parse_checklist(&original.checklist);
                Some(TodoCommand::Edit(todo))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_submits_nothing() {
        let mut dialog = TodoDialog::for_new();
        dialog.set_title("   ");
        dialog.set_description("ignored");
        assert_eq!(dialog.submit(), None);
    }

    #[test]
    fn test_add_trims_fields() {
        let mut dialog = TodoDialog::for_new();
        assert_eq!(dialog.heading(), "Add Todo");
        dialog.set_title("  Buy milk ");
        dialog.set_description(" semi-skimmed ");
        dialog.set_checklist("bottle\n\n  receipt ");

        let Some(TodoCommand::Add(todo)) = dialog.submit() else {
            panic!("expected add command");
        };
        assert_eq!(todo.id, 0);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "semi-skimmed");
        let texts: Vec<_> = todo.checklist.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["bottle", "receipt"]);
    }

    #[test]
    fn test_edit_keeps_identity_and_created_at() {
        let mut original = Todo::with_created_at("A", 1_234).with_due_date(9_000);
        original.id = 5;
        original.checklist = vec![ChecklistItem { text: "step one".into(), is_done: true }];

        let mut dialog = TodoDialog::for_edit(&original);
        assert_eq!(dialog.heading(), "Edit Todo");
        assert_eq!(dialog.title, "A");
        dialog.set_title("B");
        dialog.set_checklist("step one\nstep two");

        let Some(TodoCommand::Edit(todo)) = dialog.submit() else {
            panic!("expected edit command");
        };
        assert_eq!(todo.id, 5);
        assert_eq!(todo.title, "B");
        assert_eq!(todo.created_at, 1_234);
        assert_eq!(todo.due_date, Some(9_000));
        assert!(todo.checklist[0].is_done);
        assert!(!todo.checklist[1].is_done);
    }
}
