use anyhow::Result;
use radmap_core::domain::{Batch, Sample};
use radmap_core::layout::GridLayout;
use radmap_core::reconcile::{reconcile_calls, GenotypeView};
use radmap_core::storage::{InMemoryStorage, Storage};

fn seeded_storage() -> InMemoryStorage {
    let storage = InMemoryStorage::new();
    storage.add_batch(Batch {
        id: 1,
        date: None,
        description: "test cross".to_string(),
    });

    for id in 1..=12 {
        storage.add_sample(Sample {
            id,
            batch_id: 1,
            file: format!("progeny_{id:02}"),
        });
    }

    // Locus 42: eleven of twelve samples returned a call, one corrected.
    for id in 1..=11 {
        let genotype = if id % 2 == 0 { "lm" } else { "ll" };
        storage.add_genotype(1, 42, id, genotype);
    }
    storage.add_correction(1, 42, 4, "ll");

    storage
}

#[tokio::test]
async fn locus_view_reconciles_and_lays_out() -> Result<()> {
    let storage = seeded_storage();

    let calls = storage.locus_calls(1, 42).await?;
    assert_eq!(calls.len(), 11);
    let ids: Vec<i64> = calls.iter().map(|c| c.sample_id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted, "calls must arrive ordered by sample id");

    let rows = match reconcile_calls(&calls) {
        GenotypeView::Rows(rows) => rows,
        GenotypeView::NoGenotypes => panic!("expected rows"),
    };
    assert!(rows[3].corrected);
    assert_eq!(rows[3].genotype, "ll");
    assert!(rows.iter().filter(|r| r.corrected).count() == 1);

    // Grid rows size from the batch's sample total, not the call count.
    let layout = GridLayout::default();
    let sample_count = storage.sample_count(1).await? as usize;
    assert_eq!(layout.row_count(sample_count), 2);

    let grid = layout.arrange(rows);
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[1].iter().filter(|c| c.is_none()).count(), 9);
    Ok(())
}

#[tokio::test]
async fn locus_without_genotypes_signals_the_empty_state() -> Result<()> {
    let storage = seeded_storage();
    let calls = storage.locus_calls(1, 999).await?;
    assert_eq!(reconcile_calls(&calls), GenotypeView::NoGenotypes);
    Ok(())
}

#[tokio::test]
async fn locus_count_feeds_the_export_estimate() -> Result<()> {
    let storage = seeded_storage();
    storage.add_genotype(1, 43, 1, "nn");
    assert_eq!(storage.locus_count(1).await?, 2);
    assert_eq!(storage.locus_count(2).await?, 0);
    Ok(())
}
