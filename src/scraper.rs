use crate::config::{
    BASE_HOST, BASE_PATH, BASE_QUERY, BASE_SCHEME, FILTER_PARAMS, PAGE_PARAM, USER_AGENT,
};
use crate::verbose_println;
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;

/// Address of the past-auctions listing plus the filters to send with it.
#[derive(Debug, Clone)]
pub struct AuctionQuery {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub base_query: String,
    pub filters: Vec<(String, String)>,
}

impl Default for AuctionQuery {
    fn default() -> Self {
        Self {
            scheme: BASE_SCHEME.to_string(),
            host: BASE_HOST.to_string(),
            path: BASE_PATH.to_string(),
            base_query: BASE_QUERY.to_string(),
            filters: FILTER_PARAMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl AuctionQuery {
    pub fn page_url(&self, page: u32) -> String {
        let mut params: Vec<(&str, String)> = self
            .filters
            .iter()
            .filter(|(name, _)| name != PAGE_PARAM)
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect();
        params.push((PAGE_PARAM, page.to_string()));

        let encoded = params
            .iter()
            .map(|(name, value)| format!("{}={}", form_encode(name), form_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}://{}{}?{}&{}",
            self.scheme, self.host, self.path, self.base_query, encoded
        )
    }
}

/// Form-style encoding: spaces become `+`.
fn form_encode(text: &str) -> String {
    urlencoding::encode(text).replace("%20", "+")
}

/// Where listing pages come from.
///
/// `Ok(None)` means the page came back empty, which ends pagination without
/// being an error.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> Result<Option<String>>;
}

pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, url: &str) -> Result<Option<String>> {
        verbose_println!("Fetching listing page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .context("Failed to fetch listing page")?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch listing page: HTTP {}", response.status()));
        }

        let body = response.text().context("Failed to read response body")?;
        verbose_println!("Received {} bytes", body.len());

        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answers a single request on a local port with a canned response and
    /// returns the URL to ask for.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/charactertrade/", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        (url, handle)
    }

    fn local_source() -> HttpPageSource {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .unwrap();
        HttpPageSource::with_client(client)
    }

    #[test]
    fn whitespace_body_means_no_more_pages() {
        let (url, server) = serve_once("200 OK", "  \n\t ");
        let page = local_source().fetch_page(&url).unwrap();
        server.join().unwrap();
        assert_eq!(page, None);
    }

    #[test]
    fn error_status_fails_the_fetch() {
        let (url, server) = serve_once("503 Service Unavailable", "busy");
        let err = local_source().fetch_page(&url).unwrap_err();
        server.join().unwrap();
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn html_body_is_returned() {
        let (url, server) = serve_once("200 OK", "<html><body>auctions</body></html>");
        let page = local_source().fetch_page(&url).unwrap();
        server.join().unwrap();
        assert_eq!(page.as_deref(), Some("<html><body>auctions</body></html>"));
    }

    #[test]
    fn page_url_appends_current_page() {
        let url = AuctionQuery::default().page_url(3);
        assert!(url.starts_with(
            "https://www.tibia.com/charactertrade/?subtopic=pastcharactertrades&filter_profession=0&"
        ));
        assert!(url.contains("&filter_world=&"));
        assert!(url.ends_with("&order_column=101&order_direction=1&currentpage=3"));
    }

    #[test]
    fn page_url_leaves_filters_untouched() {
        let query = AuctionQuery::default();
        let before = query.filters.clone();
        let first = query.page_url(1);
        let second = query.page_url(2);
        assert_eq!(query.filters, before);
        assert!(first.ends_with("currentpage=1"));
        assert!(second.ends_with("currentpage=2"));
        assert_eq!(query.page_url(1), first);
    }

    #[test]
    fn page_url_replaces_existing_page_filter() {
        let query = AuctionQuery {
            filters: vec![
                ("currentpage".to_string(), "9".to_string()),
                ("filter_world".to_string(), "Antica".to_string()),
            ],
            ..Default::default()
        };
        let url = query.page_url(4);
        assert!(url.ends_with("?subtopic=pastcharactertrades&filter_world=Antica&currentpage=4"));
        assert_eq!(url.matches("currentpage").count(), 1);
    }

    #[test]
    fn page_url_encodes_values() {
        let query = AuctionQuery {
            filters: vec![("filter_world".to_string(), "Nova Era&x".to_string())],
            ..Default::default()
        };
        assert!(query
            .page_url(1)
            .contains("filter_world=Nova+Era%26x&currentpage=1"));
    }
}
