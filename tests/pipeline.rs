use anyhow::Result;
use clap::Parser;
use osti_doi_query::api::ApiResponse;
use osti_doi_query::args::Args;
use osti_doi_query::fetch::{PageResponse, Transport};
use osti_doi_query::{run_with, Outcome};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Serves one canned JSON body per identifier; everything else is an empty page.
struct CannedApi {
    bodies: HashMap<String, String>,
}

impl CannedApi {
    fn new(bodies: &[(&str, &str)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(doi, body)| (doi.to_string(), body.to_string()))
                .collect(),
        }
    }
}

impl Transport for CannedApi {
    fn get_page(&self, identifier: &str, start: usize, _rows: usize) -> Result<PageResponse> {
        match self.bodies.get(identifier) {
            Some(body) if start == 0 => {
                let response: ApiResponse = serde_json::from_str(body)?;
                Ok(PageResponse::Records(response.into_records()))
            }
            _ => Ok(PageResponse::Records(Vec::new())),
        }
    }
}

fn args_for(dir: &Path, dois: &str) -> Args {
    let input = dir.join("dois.txt");
    fs::write(&input, dois).unwrap();
    Args::parse_from([
        "osti-doi-query",
        input.to_str().unwrap(),
        "--output-dir",
        dir.join("out").to_str().unwrap(),
        "--preview",
        "0",
        "--quiet",
    ])
}

#[test]
fn test_writes_flattened_csv_for_found_dois() {
    let dir = TempDir::new().unwrap();
    let args = args_for(dir.path(), "10.2172/1\n10.2172/missing\n10.2172/2\n");
    let api = CannedApi::new(&[
        (
            "10.2172/1",
            r#"{"results": [{
                "title": "Reactor physics",
                "authors": ["Doe, J.", "Roe, R."],
                "links": [
                    {"rel": "citation", "href": "https://www.osti.gov/biblio/1"},
                    {"rel": "fulltext", "href": "https://www.osti.gov/servlets/purl/1"}
                ]
            }]}"#,
        ),
        ("10.2172/2", r#"[[{"title": "Grid storage", "publisher": "OSTI"}]]"#),
    ]);

    let outcome = run_with(&args, api).unwrap();

    let path = dir.path().join("out").join("api_results.csv");
    assert_eq!(
        outcome,
        Outcome::Written {
            path: path.clone(),
            rows: 2,
            columns: vec![
                "authors".to_string(),
                "citation_link".to_string(),
                "fulltext_link".to_string(),
                "publisher".to_string(),
                "title".to_string(),
            ],
        }
    );

    let csv = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "authors,citation_link,fulltext_link,publisher,title");
    assert_eq!(
        lines[1],
        "\"Doe, J., Roe, R.\",https://www.osti.gov/biblio/1,https://www.osti.gov/servlets/purl/1,none,Reactor physics"
    );
    assert_eq!(lines[2], "none,none,none,OSTI,Grid storage");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_no_results_when_every_doi_is_missing() {
    let dir = TempDir::new().unwrap();
    let args = args_for(dir.path(), "10.2172/a\n10.2172/b\n");

    let outcome = run_with(&args, CannedApi::new(&[])).unwrap();

    assert_eq!(outcome, Outcome::NoResults);
    assert!(!dir.path().join("out").join("api_results.csv").exists());
}

#[test]
fn test_no_results_for_empty_input() {
    let dir = TempDir::new().unwrap();
    let args = args_for(dir.path(), "");

    let outcome = run_with(&args, CannedApi::new(&[])).unwrap();

    assert_eq!(outcome, Outcome::NoResults);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unreadable_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let args = Args::parse_from([
        "osti-doi-query",
        dir.path().join("absent.txt").to_str().unwrap(),
        "--quiet",
    ]);

    assert!(run_with(&args, CannedApi::new(&[])).is_err());
}
