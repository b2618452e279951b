use crate::domain;
use crate::domain::DrivenPortError;
use crate::domain::category::Category;
use crate::domain::todo::{NewTodo, Todo};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use sqlx::{FromRow, PgConnection, query, query_as};

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i32,
    user_id: i32,
    text: String,
    done: bool,
}

/// A category joined through the link table, tagged with the todo it belongs to
#[derive(FromRow)]
struct LinkedCategoryRow {
    todo_id: i32,
    id: i32,
    user_id: i32,
    text: String,
}

impl From<TodoRow> for Todo {
    fn from(value: TodoRow) -> Self {
        Todo {
            id: value.id,
            user_id: value.user_id,
            text: value.text,
            done: value.done,
            categories: Vec::new(),
        }
    }
}

/// Fills in each todo's categories from the link table. Categories keep the order the
/// database returns the link rows in.
async fn load_categories(
    todos: &mut [Todo],
    cxn: &mut PgConnection,
) -> Result<(), DrivenPortError> {
    if todos.is_empty() {
        return Ok(());
    }

    let todo_ids: Vec<i32> = todos.iter().map(|todo| todo.id).collect();
    let linked = query_as::<_, LinkedCategoryRow>(
        "SELECT tc.todo_id, c.id, c.user_id, c.text FROM todocategory tc \
         JOIN category c ON c.id = tc.category_id \
         WHERE tc.todo_id = ANY($1)",
    )
    .bind(&todo_ids)
    .fetch_all(cxn)
    .await
    .map_err(|err| super::port_error("fetching categories for todos", err))?;

    for row in linked {
        if let Some(todo) = todos.iter_mut().find(|todo| todo.id == row.todo_id) {
            todo.categories.push(Category {
                id: row.id,
                user_id: row.user_id,
                text: row.text,
            });
        }
    }

    Ok(())
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn todos_for_user(
        &self,
        user_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let mut todos: Vec<Todo> =
            query_as::<_, TodoRow>("SELECT t.* FROM todo t WHERE t.user_id = $1 ORDER BY t.id")
                .bind(user_id)
                .fetch_all(cxn.borrow_connection())
                .await
                .map_err(|err| super::port_error("fetching todos for a user", err))?
                .into_iter()
                .map(Todo::from)
                .collect();
        load_categories(&mut todos, cxn.borrow_connection()).await?;

        Ok(todos)
    }

    async fn user_todo_by_id(
        &self,
        user_id: i32,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo = query_as::<_, TodoRow>("SELECT t.* FROM todo t WHERE t.user_id = $1 AND t.id = $2")
            .bind(user_id)
            .bind(todo_id)
            .fetch_optional(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("fetching a todo by id", err))?;

        let Some(row) = todo else {
            return Ok(None);
        };
        let mut found = [Todo::from(row)];
        load_categories(&mut found, cxn.borrow_connection()).await?;

        let [todo] = found;
        Ok(Some(todo))
    }

    async fn todos_in_category(
        &self,
        user_id: i32,
        category_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let mut todos: Vec<Todo> = query_as::<_, TodoRow>(
            "SELECT t.* FROM todo t \
             JOIN todocategory tc ON tc.todo_id = t.id \
             WHERE t.user_id = $1 AND tc.category_id = $2 \
             ORDER BY t.id",
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .map_err(|err| super::port_error("fetching todos in a category", err))?
        .into_iter()
        .map(Todo::from)
        .collect();
        load_categories(&mut todos, cxn.borrow_connection()).await?;

        Ok(todos)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i32, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let new_id = query_as::<_, super::NewId>(
            "INSERT INTO todo(user_id, text, done) VALUES ($1, $2, $3) RETURNING todo.id",
        )
        .bind(todo.user_id)
        .bind(&todo.text)
        .bind(todo.done)
        .fetch_one(cxn.borrow_connection())
        .await
        .map_err(|err| super::port_error("inserting a new todo", err))?;

        Ok(new_id.id)
    }

    async fn save_todo(
        &self,
        todo: &Todo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let result = query("UPDATE todo SET text = $1, done = $2 WHERE id = $3")
            .bind(&todo.text)
            .bind(todo.done)
            .bind(todo.id)
            .execute(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("saving a todo", err))?;

        if result.rows_affected() == 0 {
            return Err(DrivenPortError::DoesNotExist);
        }

        Ok(())
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // todocategory rows cascade with the todo
        let result = query("DELETE FROM todo WHERE id = $1")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("removing a todo", err))?;

        if result.rows_affected() == 0 {
            return Err(DrivenPortError::DoesNotExist);
        }

        Ok(())
    }
}
