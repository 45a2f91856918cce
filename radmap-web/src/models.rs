use serde::Deserialize;

/// Query parameters naming the locus to view.
#[derive(Debug, Clone, Deserialize)]
pub struct GenotypePageParams {
    #[serde(default)]
    pub batch_id: i64,
    #[serde(default)]
    pub tag_id: i64,
}

fn default_dtype() -> String {
    "haplo".to_string()
}

fn default_mtype() -> String {
    "gen".to_string()
}

fn default_dlim() -> u32 {
    1
}

fn default_otype() -> String {
    "tsv".to_string()
}

/// Query parameters of the export trigger, defaults matching the page's
/// export dialog.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_dtype")]
    pub dtype: String,
    #[serde(default = "default_mtype")]
    pub mtype: String,
    #[serde(default = "default_dlim")]
    pub dlim: u32,
    #[serde(default)]
    pub mcor: u8,
    #[serde(default = "default_otype")]
    pub otype: String,
}
