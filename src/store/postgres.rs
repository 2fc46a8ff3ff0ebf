use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ApplicationOrder, ContactOrder, Store};
use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::contact::Contact;

/// PostgreSQL-backed store; one table per collection.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn application_order_clause(order: ApplicationOrder) -> String {
    let (column, direction) = match order {
        ApplicationOrder::ApplicationDate(d) => ("application_date", d),
        ApplicationOrder::Company(d) => ("company", d),
        ApplicationOrder::CreatedAt(d) => ("created_at", d),
    };
    format!("ORDER BY {column} {}, id ASC", direction.sql())
}

fn contact_order_clause(order: ContactOrder) -> String {
    let (column, direction) = match order {
        ContactOrder::Name(d) => ("name", d),
        ContactOrder::CreatedAt(d) => ("created_at", d),
    };
    format!("ORDER BY {column} {}, id ASC", direction.sql())
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_applications(
        &self,
        order: ApplicationOrder,
    ) -> Result<Vec<Application>, AppError> {
        let sql = format!(
            "SELECT * FROM applications {}",
            application_order_clause(order)
        );
        let rows = sqlx::query_as::<_, Application>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_application(&self, app: &Application) -> Result<Application, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (id, company, position, job_description, job_link,
                location, salary, application_date, status, next_steps, notes, contact_id,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(app.id)
        .bind(&app.company)
        .bind(&app.position)
        .bind(&app.job_description)
        .bind(&app.job_link)
        .bind(&app.location)
        .bind(&app.salary)
        .bind(app.application_date)
        .bind(app.status)
        .bind(&app.next_steps)
        .bind(&app.notes)
        .bind(app.contact_id)
        .bind(app.created_at)
        .bind(app.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn replace_application(
        &self,
        app: &Application,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications SET
                company = $2,
                position = $3,
                job_description = $4,
                job_link = $5,
                location = $6,
                salary = $7,
                application_date = $8,
                status = $9,
                next_steps = $10,
                notes = $11,
                contact_id = $12,
                updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(app.id)
        .bind(&app.company)
        .bind(&app.position)
        .bind(&app.job_description)
        .bind(&app.job_link)
        .bind(&app.location)
        .bind(&app.salary)
        .bind(app.application_date)
        .bind(app.status)
        .bind(&app.next_steps)
        .bind(&app.notes)
        .bind(app.contact_id)
        .bind(app.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_contacts(&self, order: ContactOrder) -> Result<Vec<Contact>, AppError> {
        let sql = format!("SELECT * FROM contacts {}", contact_order_clause(order));
        let rows = sqlx::query_as::<_, Contact>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_contact(&self, contact: &Contact) -> Result<Contact, AppError> {
        let row = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (id, name, company, position, email, phone, linked_in,
                relationship, notes, last_contact_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.company)
        .bind(&contact.position)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.linked_in)
        .bind(contact.relationship)
        .bind(&contact.notes)
        .bind(contact.last_contact_date)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn replace_contact(&self, contact: &Contact) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts SET
                name = $2,
                company = $3,
                position = $4,
                email = $5,
                phone = $6,
                linked_in = $7,
                relationship = $8,
                notes = $9,
                last_contact_date = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.company)
        .bind(&contact.position)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.linked_in)
        .bind(contact.relationship)
        .bind(&contact.notes)
        .bind(contact.last_contact_date)
        .bind(contact.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
