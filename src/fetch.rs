use crate::api::{ApiResponse, Record};
use crate::utils::{build_query, page_offset};
use anyhow::{ensure, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fmt;

/// What a single page request came back with.
#[derive(Debug)]
pub enum PageResponse {
    Records(Vec<Record>),
    Status(u16),
}

pub trait Transport {
    fn get_page(&self, identifier: &str, start: usize, rows: usize) -> Result<PageResponse>;
}

pub struct HttpTransport {
    client: Client,
    api_url: String,
}

impl HttpTransport {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn get_page(&self, identifier: &str, start: usize, rows: usize) -> Result<PageResponse> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&build_query(identifier, start, rows))
            .send()?;

        if response.status() != StatusCode::OK {
            return Ok(PageResponse::Status(response.status().as_u16()));
        }

        let body: ApiResponse = response.json()?;
        Ok(PageResponse::Records(body.into_records()))
    }
}

/// Reporting side effects of a fetch. None of these change control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Progress {
        done: usize,
        total: usize,
    },
    PageFailed {
        identifier: String,
        page: usize,
        status: u16,
    },
    RequestFailed {
        identifier: String,
        page: usize,
        reason: String,
    },
    EmptyPage {
        identifier: String,
        page: usize,
    },
    NotFound {
        identifier: String,
    },
}

impl fmt::Display for FetchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchEvent::Progress { done, total } => write!(f, "{done}/{total} identifiers"),
            FetchEvent::PageFailed {
                identifier,
                page,
                status,
            } => write!(
                f,
                "request for DOI {identifier} batch {page} failed with status code {status}"
            ),
            FetchEvent::RequestFailed {
                identifier,
                page,
                reason,
            } => write!(f, "request for DOI {identifier} batch {page} failed: {reason}"),
            FetchEvent::EmptyPage { identifier, page } => {
                write!(f, "DOI {identifier} batch {page} returned no rows")
            }
            FetchEvent::NotFound { identifier } => write!(f, "DOI {identifier} was not found"),
        }
    }
}

#[derive(Debug, Default)]
pub struct IdentifierResult {
    pub records: Vec<Record>,
    pub not_found: bool,
}

/// Records across every identifier, in fetch order.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub records: Vec<Record>,
    pub not_found: Vec<String>,
}

pub struct Fetcher<T> {
    transport: T,
    page_size: usize,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, page_size: usize) -> Result<Self> {
        ensure!(page_size > 0, "page size must be at least 1");
        Ok(Self {
            transport,
            page_size,
        })
    }

    pub fn fetch_all<F>(&self, identifier: &str, mut on_event: F) -> IdentifierResult
    where
        F: FnMut(FetchEvent),
    {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let start = page_offset(page, self.page_size);
            let rows = match self.transport.get_page(identifier, start, self.page_size) {
                Ok(PageResponse::Records(rows)) => rows,
                Ok(PageResponse::Status(status)) => {
                    on_event(FetchEvent::PageFailed {
                        identifier: identifier.to_string(),
                        page,
                        status,
                    });
                    break;
                }
                Err(err) => {
                    on_event(FetchEvent::RequestFailed {
                        identifier: identifier.to_string(),
                        page,
                        reason: format!("{err:#}"),
                    });
                    break;
                }
            };

            if rows.is_empty() {
                // an empty first page is reported as not-found below
                if page > 1 {
                    on_event(FetchEvent::EmptyPage {
                        identifier: identifier.to_string(),
                        page,
                    });
                }
                break;
            }

            let last_page = rows.len() < self.page_size;
            records.extend(rows);
            if last_page {
                break;
            }
            page += 1;
        }

        let not_found = records.is_empty();
        if not_found {
            on_event(FetchEvent::NotFound {
                identifier: identifier.to_string(),
            });
        }

        IdentifierResult { records, not_found }
    }

    pub fn fetch_batch<F>(&self, identifiers: &[String], mut on_event: F) -> ResultSet
    where
        F: FnMut(FetchEvent),
    {
        let mut result = ResultSet::default();
        let total = identifiers.len();

        for (index, identifier) in identifiers.iter().enumerate() {
            let fetched = self.fetch_all(identifier, &mut on_event);
            if fetched.not_found {
                result.not_found.push(identifier.clone());
            }
            result.records.extend(fetched.records);
            on_event(FetchEvent::Progress {
                done: index + 1,
                total,
            });
        }

        result
    }
}
