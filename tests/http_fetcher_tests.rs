use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use clashgen::utils::{FetchError, HttpFetcher, RulesetFetcher};
use clashgen::Settings;

/// Answer a single request with a canned response and hand back the request head
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/rules.list", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });

    (url, handle)
}

fn direct_settings() -> Settings {
    Settings {
        proxy_ruleset: "NONE".to_string(),
        timeout_secs: 5,
        ..Settings::default()
    }
}

#[cfg(test)]
mod http_fetcher_tests {
    use super::*;

    #[test]
    fn test_fetch_returns_body() {
        let (url, server) = serve_once("200 OK", "DOMAIN,example.com\nMATCH,Proxy\n");
        let fetcher = HttpFetcher::new(&direct_settings()).unwrap();

        let body = fetcher.fetch(&url).unwrap();
        assert_eq!(body, "DOMAIN,example.com\nMATCH,Proxy\n");

        let head = server.join().unwrap();
        assert!(head.starts_with("GET /rules.list HTTP/1.1"));
        assert!(head.to_lowercase().contains("user-agent: clash meta"));
    }

    #[test]
    fn test_custom_user_agent() {
        let (url, server) = serve_once("200 OK", "payload: []\n");
        let settings = Settings {
            user_agent: "clashgen-test".to_string(),
            ..direct_settings()
        };
        let fetcher = HttpFetcher::new(&settings).unwrap();

        fetcher.fetch(&url).unwrap();
        assert!(server
            .join()
            .unwrap()
            .to_lowercase()
            .contains("user-agent: clashgen-test"));
    }

    #[test]
    fn test_error_status_is_failure() {
        let (url, server) = serve_once("404 Not Found", "missing");
        let fetcher = HttpFetcher::new(&direct_settings()).unwrap();

        let result = fetcher.fetch(&url);
        assert!(matches!(result, Err(FetchError::Status(404))));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_host_is_failure() {
        // bind then drop so nothing listens on the port
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let fetcher = HttpFetcher::new(&direct_settings()).unwrap();

        let result = fetcher.fetch(&format!("http://127.0.0.1:{}/rules.list", port));
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
