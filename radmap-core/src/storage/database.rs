use super::traits::Storage;
use crate::common::error::{Result, ViewerError};
use crate::database::DatabaseManager;
use crate::domain::{Batch, SampleCall};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// Storage over the pipeline's relational schema using Turso/libSQL.
pub struct DatabaseStorage {
    db: Arc<DatabaseManager>,
}

impl DatabaseStorage {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db: Arc::new(db) }
    }
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn sample_count(&self, batch_id: i64) -> Result<i64> {
        let conn = self.db.get_connection().await?;

        let mut rows = conn
            .query(
                "SELECT COUNT(id) FROM samples WHERE batch_id = ?1",
                libsql::params![batch_id],
            )
            .await
            .map_err(|e| ViewerError::Database {
                message: format!("Failed to count samples: {e}"),
            })?;

        let row = rows
            .next()
            .await
            .map_err(|e| ViewerError::Database {
                message: format!("Failed to read row: {e}"),
            })?
            .ok_or_else(|| ViewerError::Database {
                message: "Sample count query returned no row".to_string(),
            })?;

        row.get(0).map_err(|e| ViewerError::Database {
            message: format!("Failed to get count: {e}"),
        })
    }

    async fn locus_calls(&self, batch_id: i64, catalog_id: i64) -> Result<Vec<SampleCall>> {
        let conn = self.db.get_connection().await?;

        let mut rows = conn
            .query(
                "SELECT catalog_genotypes.sample_id, samples.file, \
                 catalog_genotypes.genotype, genotype_corrections.genotype AS corrected \
                 FROM catalog_genotypes \
                 LEFT JOIN genotype_corrections ON \
                 (genotype_corrections.catalog_id = catalog_genotypes.catalog_id AND \
                 genotype_corrections.sample_id = catalog_genotypes.sample_id AND \
                 genotype_corrections.batch_id = catalog_genotypes.batch_id) \
                 JOIN samples ON (catalog_genotypes.sample_id = samples.id) \
                 WHERE catalog_genotypes.batch_id = ?1 AND catalog_genotypes.catalog_id = ?2 \
                 ORDER BY catalog_genotypes.sample_id",
                libsql::params![batch_id, catalog_id],
            )
            .await
            .map_err(|e| ViewerError::Database {
                message: format!("Failed to query locus genotypes: {e}"),
            })?;

        let mut calls = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| ViewerError::Database {
            message: format!("Failed to read row: {e}"),
        })? {
            let sample_id: i64 = row.get(0).map_err(|e| ViewerError::Database {
                message: format!("Failed to get sample_id: {e}"),
            })?;
            let file: String = row.get(1).map_err(|e| ViewerError::Database {
                message: format!("Failed to get file: {e}"),
            })?;
            let genotype: String = row.get(2).map_err(|e| ViewerError::Database {
                message: format!("Failed to get genotype: {e}"),
            })?;
            let correction: Option<String> = row.get(3).ok();

            calls.push(SampleCall {
                sample_id,
                file,
                genotype,
                correction,
            });
        }

        debug!(
            "Loaded {} genotype calls for batch {batch_id} catalog {catalog_id}",
            calls.len()
        );
        Ok(calls)
    }

    async fn locus_count(&self, batch_id: i64) -> Result<i64> {
        let conn = self.db.get_connection().await?;

        let mut rows = conn
            .query(
                "SELECT COUNT(DISTINCT catalog_id) FROM catalog_genotypes WHERE batch_id = ?1",
                libsql::params![batch_id],
            )
            .await
            .map_err(|e| ViewerError::Database {
                message: format!("Failed to count loci: {e}"),
            })?;

        let row = rows
            .next()
            .await
            .map_err(|e| ViewerError::Database {
                message: format!("Failed to read row: {e}"),
            })?
            .ok_or_else(|| ViewerError::Database {
                message: "Locus count query returned no row".to_string(),
            })?;

        row.get(0).map_err(|e| ViewerError::Database {
            message: format!("Failed to get count: {e}"),
        })
    }

    async fn batches(&self) -> Result<Vec<Batch>> {
        let conn = self.db.get_connection().await?;

        let mut rows = conn
            .query(
                "SELECT id, date, description FROM batches ORDER BY id",
                libsql::params![],
            )
            .await
            .map_err(|e| ViewerError::Database {
                message: format!("Failed to query batches: {e}"),
            })?;

        let mut batches = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| ViewerError::Database {
            message: format!("Failed to read row: {e}"),
        })? {
            let id: i64 = row.get(0).map_err(|e| ViewerError::Database {
                message: format!("Failed to get id: {e}"),
            })?;
            let date: Option<String> = row.get(1).ok();
            let description: String = row.get(2).unwrap_or_default();

            batches.push(Batch {
                id,
                date: date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
                description,
            });
        }

        Ok(batches)
    }
}
