use crate::domain;
use crate::domain::DrivenPortError;
use crate::domain::category::{Category, NewCategory, TodoCategory};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use sqlx::{FromRow, query, query_as};

#[derive(FromRow)]
struct CategoryRow {
    id: i32,
    user_id: i32,
    text: String,
}

impl From<CategoryRow> for Category {
    fn from(value: CategoryRow) -> Self {
        Category {
            id: value.id,
            user_id: value.user_id,
            text: value.text,
        }
    }
}

pub struct DbCategoryReader;

impl domain::category::driven_ports::CategoryReader for DbCategoryReader {
    async fn categories_for_user(
        &self,
        user_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Category>, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let categories = query_as::<_, CategoryRow>(
            "SELECT c.* FROM category c WHERE c.user_id = $1 ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .map_err(|err| super::port_error("fetching categories for a user", err))?
        .into_iter()
        .map(Category::from)
        .collect();

        Ok(categories)
    }
}

pub struct DbCategoryWriter;

impl domain::category::driven_ports::CategoryWriter for DbCategoryWriter {
    async fn create_category(
        &self,
        category: &NewCategory,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i32, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let new_id = query_as::<_, super::NewId>(
            "INSERT INTO category(user_id, text) VALUES ($1, $2) RETURNING category.id",
        )
        .bind(category.user_id)
        .bind(&category.text)
        .fetch_one(cxn.borrow_connection())
        .await
        .map_err(|err| super::port_error("inserting a new category", err))?;

        Ok(new_id.id)
    }

    async fn link_todo(
        &self,
        link: &TodoCategory,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("INSERT INTO todocategory(category_id, todo_id) VALUES ($1, $2)")
            .bind(link.category_id)
            .bind(link.todo_id)
            .execute(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("linking a todo to a category", err))?;

        Ok(())
    }

    async fn unlink_todo(
        &self,
        link: &TodoCategory,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("DELETE FROM todocategory WHERE category_id = $1 AND todo_id = $2")
            .bind(link.category_id)
            .bind(link.todo_id)
            .execute(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("unlinking a todo from a category", err))?;

        Ok(())
    }
}
