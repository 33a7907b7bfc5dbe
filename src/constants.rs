pub const BASE_URL: &str = "https://www.osti.gov/api/v1/records";
pub const PAGE_SIZE: usize = 100;

pub const PLACEHOLDER: &str = "none";

pub const OUTPUT_FILENAME: &str = "api_results.csv";

pub const LINKS_FIELD: &str = "links";
pub const CITATION_REL: &str = "citation";
pub const FULLTEXT_REL: &str = "fulltext";
pub const CITATION_COLUMN: &str = "citation_link";
pub const FULLTEXT_COLUMN: &str = "fulltext_link";
