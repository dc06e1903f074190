#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        api::{
            Fetch, HttpFetcher,
            fetch::{backoff_delay, join_url},
            quote::QUOTE_PATH,
            screener::SCREENER_PATH,
        },
        config::Config,
        error::ScrapeError,
        test::fixtures::{http_response, serve},
    };

    const PAGE: &str = "<html><body><p id=\"greeting\">hello</p></body></html>";

    fn local_fetcher(base_url: &str) -> HttpFetcher {
        let config = Config {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
            retries: 2,
            backoff: Duration::from_millis(1),
            ..Config::default()
        };
        HttpFetcher::new(&config).unwrap()
    }

    #[test]
    fn it_works() {
        assert_eq!(join_url("https://finviz.com", "/quote.ashx"), "https://finviz.com/quote.ashx");
        assert_eq!(join_url("https://finviz.com/", "quote.ashx"), "https://finviz.com/quote.ashx");
        assert_eq!(join_url("http://localhost:8080/", "/screener.ashx"), "http://localhost:8080/screener.ashx");
    }

    #[test]
    fn fetcher_resolves_against_base_url() {
        let config = Config {
            base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        assert_eq!(fetcher.url("/quote.ashx"), "http://localhost:8080/quote.ashx");
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        let base = Duration::from_millis(1800);

        assert_eq!(backoff_delay(base, 1), Duration::from_millis(1800));
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(3600));
        assert_eq!(backoff_delay(base, 3), Duration::from_millis(7200));
        assert_eq!(backoff_delay(Duration::MAX, 2), Duration::MAX);
        assert_eq!(backoff_delay(Duration::from_secs(u64::MAX / 2), 40), Duration::MAX);
    }

    #[test]
    fn successful_response_is_parsed() {
        let (base_url, server) = serve(vec![http_response("200 OK", PAGE)]);
        let fetcher = local_fetcher(&base_url);

        let document = fetcher.fetch(SCREENER_PATH, &[("v", "111".to_string())]).unwrap();
        let selector = scraper::Selector::parse("#greeting").unwrap();
        assert!(document.select(&selector).next().is_some());
        assert_eq!(server.join().unwrap(), 1);
    }

    #[test]
    fn quote_404_is_remote_not_found() {
        let (base_url, server) = serve(vec![http_response("404 Not Found", "missing")]);
        let fetcher = local_fetcher(&base_url);

        let err = fetcher.fetch(QUOTE_PATH, &[("t", "ZZZZ".to_string())]).unwrap_err();
        assert!(matches!(err, ScrapeError::RemoteNotFound { .. }));
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(server.join().unwrap(), 1);
    }

    #[test]
    fn other_404_is_unhandled() {
        let (base_url, server) = serve(vec![http_response("404 Not Found", "missing")]);
        let fetcher = local_fetcher(&base_url);

        let err = fetcher.fetch(SCREENER_PATH, &[]).unwrap_err();
        assert!(matches!(err, ScrapeError::TransportUnhandled { .. }));
        assert!(err.is_transport());
        assert!(!err.is_not_found());
        assert_eq!(server.join().unwrap(), 1);
    }

    #[test]
    fn blank_body_is_empty_document() {
        let (base_url, server) = serve(vec![http_response("200 OK", "  \n ")]);
        let fetcher = local_fetcher(&base_url);

        let err = fetcher.fetch(SCREENER_PATH, &[]).unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyDocument { .. }));
        assert_eq!(server.join().unwrap(), 1);
    }

    #[test]
    fn server_errors_exhaust_the_retries() {
        let unavailable = http_response("503 Service Unavailable", "busy");
        let (base_url, server) = serve(vec![unavailable; 3]);
        let fetcher = local_fetcher(&base_url);

        let err = fetcher.fetch(SCREENER_PATH, &[]).unwrap_err();
        match &err {
            ScrapeError::TransportExhausted { attempts, .. } => assert_eq!(*attempts, 3),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().contains("after 3 attempt(s)"));
        assert_eq!(server.join().unwrap(), 3);
    }

    #[test]
    fn server_error_then_success_recovers() {
        let (base_url, server) = serve(vec![
            http_response("503 Service Unavailable", "busy"),
            http_response("200 OK", PAGE),
        ]);
        let fetcher = local_fetcher(&base_url);

        assert!(fetcher.fetch(SCREENER_PATH, &[]).is_ok());
        assert_eq!(server.join().unwrap(), 2);
    }
}
