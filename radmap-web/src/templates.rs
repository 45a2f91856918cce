use askama::Template;

use radmap_core::domain::{Batch, DisplayRow};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub batches: Vec<Batch>,
}

#[derive(Template)]
#[template(path = "genotypes.html")]
pub struct GenotypesTemplate {
    pub batch_id: i64,
    pub tag_id: i64,
    pub database: String,
    pub columns: usize,
    /// Grid height derived from the batch's total sample count, which can
    /// exceed the number of cells actually populated.
    pub grid_rows: usize,
    pub grid: Vec<Vec<Option<DisplayRow>>>,
}

#[derive(Template)]
#[template(path = "no_genotypes.html")]
pub struct NoGenotypesTemplate;
