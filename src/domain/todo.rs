use crate::domain::category::Category;
use crate::dto;
use serde::Serialize;

/// A stored todo along with the categories it's tagged with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i32,
    pub user_id: i32,
    pub text: String,
    pub done: bool,
    pub categories: Vec<Category>,
}

impl Todo {
    /// Flips the todo between done and not done
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    /// Labels of the todo's categories joined with ", ", in the order the categories are held
    pub fn category_list(&self) -> String {
        self.categories
            .iter()
            .map(|category| category.text.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    }

    /// Copies every field that is set on `update` onto this todo
    pub fn apply_update(&mut self, update: &UpdateTodo) {
        if let Some(ref text) = update.text {
            self.text = text.clone();
        }
        if let Some(done) = update.done {
            self.done = done;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub user_id: i32,
    pub text: String,
    pub done: bool,
}

impl NewTodo {
    /// New todos always start out not done
    pub fn for_user(user_id: i32, create: dto::TodoCreate) -> NewTodo {
        NewTodo {
            user_id,
            text: create.text,
            done: false,
        }
    }
}

/// Partial update for a todo. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub done: Option<bool>,
}

pub mod driven_ports {
    use super::*;
    use crate::domain::DrivenPortError;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader {
        /// Every todo owned by the user, categories included
        async fn todos_for_user(
            &self,
            user_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, DrivenPortError>;

        async fn user_todo_by_id(
            &self,
            user_id: i32,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, DrivenPortError>;

        /// The user's todos tagged with the given category, categories included
        async fn todos_in_category(
            &self,
            user_id: i32,
            category_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, DrivenPortError>;
    }

    pub trait TodoWriter {
        async fn create_todo(
            &self,
            todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i32, DrivenPortError>;

        /// Writes the todo's text and done flag. Its categories are managed through the link table.
        async fn save_todo(
            &self,
            todo: &Todo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), DrivenPortError>;

        /// Removes the todo along with its category links. Fails with `DoesNotExist` if there
        /// was no such todo.
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), DrivenPortError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    fn todo_with_categories(labels: &[&str]) -> Todo {
        Todo {
            id: 1,
            user_id: 1,
            text: "Something to do".to_owned(),
            done: false,
            categories: labels
                .iter()
                .enumerate()
                .map(|(index, label)| Category {
                    id: index as i32 + 1,
                    user_id: 1,
                    text: (*label).to_owned(),
                })
                .collect(),
        }
    }

    mod toggle {
        use super::*;

        #[test]
        fn flips_done() {
            let mut todo = todo_with_categories(&[]);

            todo.toggle();
            assert!(todo.done);
        }

        #[test]
        fn is_its_own_inverse() {
            let mut todo = todo_with_categories(&[]);

            todo.toggle();
            todo.toggle();
            assert!(!todo.done);
        }
    }

    mod category_list {
        use super::*;

        #[test]
        fn joins_labels_in_held_order() {
            let todo = todo_with_categories(&["work", "urgent"]);

            assert_eq!("work, urgent", todo.category_list());
        }

        #[test]
        fn empty_without_categories() {
            let todo = todo_with_categories(&[]);

            assert_eq!("", todo.category_list());
        }

        #[test]
        fn single_category_has_no_separator() {
            let todo = todo_with_categories(&["home"]);

            assert_eq!("home", todo.category_list());
        }
    }

    mod apply_update {
        use super::*;

        #[test]
        fn empty_update_changes_nothing() {
            let mut todo = todo_with_categories(&["work"]);
            todo.done = true;
            let before = todo.clone();

            todo.apply_update(&UpdateTodo::default());
            assert_eq!(before, todo);
        }

        #[test]
        fn sets_only_provided_fields() {
            let mut todo = todo_with_categories(&[]);

            todo.apply_update(&UpdateTodo {
                text: None,
                done: Some(true),
            });
            assert_eq!("Something to do", todo.text);
            assert!(todo.done);

            todo.apply_update(&UpdateTodo {
                text: Some("Something else".to_owned()),
                done: None,
            });
            assert_eq!("Something else", todo.text);
            assert!(todo.done);
        }
    }

    #[test]
    fn new_todo_starts_not_done() {
        let created = NewTodo::for_user(
            3,
            dto::TodoCreate {
                text: "Buy milk".to_owned(),
            },
        );

        assert_eq!(
            NewTodo {
                user_id: 3,
                text: "Buy milk".to_owned(),
                done: false,
            },
            created
        );
    }
}
