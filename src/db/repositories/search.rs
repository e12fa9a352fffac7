use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::entities::{prelude::*, searches};

/// One search about to be appended to the audit log. `created_at` is
/// assigned by the database.
#[derive(Debug, Clone)]
pub struct NewSearch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_magnitude: f64,
    pub max_magnitude: Option<f64>,
    pub raw_response: String,
}

pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, search: NewSearch) -> Result<i32> {
        let active_model = searches::ActiveModel {
            start_date: Set(search.start_date.map(|d| d.to_string())),
            end_date: Set(search.end_date.map(|d| d.to_string())),
            min_magnitude: Set(search.min_magnitude),
            max_magnitude: Set(search.max_magnitude),
            raw_response: Set(search.raw_response),
            ..Default::default()
        };

        let result = Searches::insert(active_model).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Searches::find().count(&self.conn).await?;
        Ok(count)
    }

    pub async fn latest(&self) -> Result<Option<searches::Model>> {
        let row = Searches::find()
            .order_by_desc(searches::Column::Id)
            .one(&self.conn)
            .await?;
        Ok(row)
    }
}
