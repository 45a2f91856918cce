use super::traits::Storage;
use crate::common::error::Result;
use crate::domain::{Batch, Sample, SampleCall};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone)]
struct GenotypeRow {
    batch_id: i64,
    catalog_id: i64,
    sample_id: i64,
    genotype: String,
}

/// In-memory storage implementation for development/testing
pub struct InMemoryStorage {
    batches: Arc<Mutex<Vec<Batch>>>,
    samples: Arc<Mutex<Vec<Sample>>>,
    genotypes: Arc<Mutex<Vec<GenotypeRow>>>,
    corrections: Arc<Mutex<Vec<GenotypeRow>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            batches: Arc::new(Mutex::new(Vec::new())),
            samples: Arc::new(Mutex::new(Vec::new())),
            genotypes: Arc::new(Mutex::new(Vec::new())),
            corrections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_batch(&self, batch: Batch) {
        debug!("Added batch {}", batch.id);
        self.batches.lock().unwrap().push(batch);
    }

    pub fn add_sample(&self, sample: Sample) {
        self.samples.lock().unwrap().push(sample);
    }

    pub fn add_genotype(&self, batch_id: i64, catalog_id: i64, sample_id: i64, genotype: &str) {
        self.genotypes.lock().unwrap().push(GenotypeRow {
            batch_id,
            catalog_id,
            sample_id,
            genotype: genotype.to_string(),
        });
    }

    pub fn add_correction(&self, batch_id: i64, catalog_id: i64, sample_id: i64, genotype: &str) {
        self.corrections.lock().unwrap().push(GenotypeRow {
            batch_id,
            catalog_id,
            sample_id,
            genotype: genotype.to_string(),
        });
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn sample_count(&self, batch_id: i64) -> Result<i64> {
        let samples = self.samples.lock().unwrap();
        Ok(samples.iter().filter(|s| s.batch_id == batch_id).count() as i64)
    }

    async fn locus_calls(&self, batch_id: i64, catalog_id: i64) -> Result<Vec<SampleCall>> {
        let samples = self.samples.lock().unwrap();
        let genotypes = self.genotypes.lock().unwrap();
        let corrections = self.corrections.lock().unwrap();

        let mut calls: Vec<SampleCall> = genotypes
            .iter()
            .filter(|g| g.batch_id == batch_id && g.catalog_id == catalog_id)
            .map(|g| {
                let file = samples
                    .iter()
                    .find(|s| s.id == g.sample_id)
                    .map(|s| s.file.clone())
                    .unwrap_or_default();
                let correction = corrections
                    .iter()
                    .find(|c| {
                        c.batch_id == batch_id
                            && c.catalog_id == catalog_id
                            && c.sample_id == g.sample_id
                    })
                    .map(|c| c.genotype.clone());
                SampleCall {
                    sample_id: g.sample_id,
                    file,
                    genotype: g.genotype.clone(),
                    correction,
                }
            })
            .collect();

        calls.sort_by_key(|call| call.sample_id);
        Ok(calls)
    }

    async fn locus_count(&self, batch_id: i64) -> Result<i64> {
        let genotypes = self.genotypes.lock().unwrap();
        let mut loci: Vec<i64> = genotypes
            .iter()
            .filter(|g| g.batch_id == batch_id)
            .map(|g| g.catalog_id)
            .collect();
        loci.sort_unstable();
        loci.dedup();
        Ok(loci.len() as i64)
    }

    async fn batches(&self) -> Result<Vec<Batch>> {
        let batches = self.batches.lock().unwrap();
        let mut all: Vec<Batch> = batches.clone();
        all.sort_by_key(|b| b.id);
        Ok(all)
    }
}
