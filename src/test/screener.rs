#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::{
        api::{
            Screener, ScreenerQuery,
            screener::{SCREENER_PATH, read_rows, read_total, total_pages},
        },
        error::{ScrapeError, ValidationError},
        models::{Exchange, Index, Order, Signal},
        test::fixtures::{MockFetcher, screener_page},
    };

    fn page_tickers(count: usize, offset: usize) -> Vec<String> {
        (0..count).map(|n| format!("T{:03}", offset + n)).collect()
    }

    fn page(total_marker: &str, tickers: &[String], first_number: usize) -> String {
        let tickers: Vec<&str> = tickers.iter().map(String::as_str).collect();
        screener_page(total_marker, &tickers, first_number)
    }

    #[test]
    fn it_works() {
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn total_is_read_from_marker() {
        let document = Html::parse_document(&screener_page("Total: 8123 #1", &[], 1));
        assert_eq!(read_total(&document).unwrap(), 8123);

        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert_eq!(read_total(&document).unwrap(), 0);
    }

    #[test]
    fn total_pattern_is_reused_across_pages() {
        for (marker, total) in [("Total: 41 #1", 41), ("Total: 41 #21", 41), ("Total: 7 #1", 7)] {
            let document = Html::parse_document(&screener_page(marker, &[], 1));
            assert_eq!(read_total(&document).unwrap(), total);
        }
    }

    #[test]
    fn oversized_total_is_malformed() {
        let document =
            Html::parse_document(&screener_page("Total: 99999999999999999999999 #1", &[], 1));
        let err = read_total(&document).unwrap_err();

        assert!(matches!(err, ScrapeError::MalformedDocument(_)));
    }

    #[test]
    fn rows_map_to_overviews() {
        let document = Html::parse_document(&screener_page("Total: 2 #1", &["AAPL", "MSFT"], 1));
        let rows = read_rows(&document).unwrap();

        assert_eq!(rows.len(), 2);
        let first = &rows[0];
        assert_eq!(first.ticker(), "AAPL");
        assert_eq!(first.company().as_deref(), Some("AAPL Corp"));
        assert_eq!(first.sector().as_deref(), Some("Technology"));
        assert_eq!(first.industry().as_deref(), Some("Software"));
        assert_eq!(first.country().as_deref(), Some("USA"));
        assert_eq!(first.market_cap().as_deref(), Some("12.5B"));
        assert_eq!(*first.p_e(), None);
        assert_eq!(first.price().as_deref(), Some("101.20"));
        assert_eq!(first.change().as_deref(), Some("0.45%"));
        assert_eq!(first.volume().as_deref(), Some("1,234,567"));
        assert_eq!(rows[1].ticker(), "MSFT");
    }

    #[test]
    fn short_rows_are_malformed() {
        let page = screener_page("Total: 1 #1", &[], 1).replace(
            "</tbody>",
            "<tr><td>1</td><td>AAPL</td><td>Apple Inc</td></tr></tbody>",
        );
        let err = read_rows(&Html::parse_document(&page)).unwrap_err();

        assert!(matches!(err, ScrapeError::MalformedDocument(_)));
    }

    #[test]
    fn missing_table_is_malformed() {
        let document = Html::parse_document("<html><body><div id=\"screener-total\">Total: 3 #1</div></body></html>");
        let err = read_rows(&document).unwrap_err();

        assert!(matches!(err, ScrapeError::MalformedDocument(_)));
    }

    #[test]
    fn zero_total_fetches_once() {
        let fetcher = MockFetcher::always(
            "<html><body><div id=\"screener-total\">Total: 0 #0</div></body></html>".to_string(),
        );
        let mut screener = Screener::new(ScreenerQuery::default());

        let rows = screener.fetch_all(&fetcher).unwrap();
        assert!(rows.is_empty());
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(screener.total(), 0);
        assert_eq!(screener.pages(), 0);
        assert!(screener.is_empty());
    }

    #[test]
    fn every_page_is_collected_in_order() {
        let first = page_tickers(20, 0);
        let second = page_tickers(20, 20);
        let third = page_tickers(1, 40);
        let fetcher = MockFetcher::new(vec![
            page("Total: 41 #1", &first, 1),
            page("Total: 41 #21", &second, 21),
            page("Total: 41 #41", &third, 41),
        ]);
        let mut screener = Screener::new(ScreenerQuery::default());

        let rows = screener.fetch_all(&fetcher).unwrap();
        assert_eq!(rows.len(), 41);
        assert_eq!(rows[0].ticker(), "T000");
        assert_eq!(rows[20].ticker(), "T020");
        assert_eq!(rows[40].ticker(), "T040");

        assert_eq!(fetcher.calls(), 3);
        for (call, offset) in ["1", "21", "41"].iter().enumerate() {
            assert_eq!(fetcher.path(call).as_deref(), Some(SCREENER_PATH));
            assert_eq!(fetcher.param(call, "r").as_deref(), Some(*offset));
        }
        assert_eq!(screener.total(), 41);
        assert_eq!(screener.pages(), 3);
        assert_eq!(screener.len(), 41);
        assert_eq!(screener.get(40).map(|row| row.ticker().as_str()), Some("T040"));
        assert!(screener.get(41).is_none());
        assert_eq!(screener.iter().count(), 41);
    }

    #[test]
    fn rows_are_fetched_only_once() {
        let fetcher = MockFetcher::new(vec![page("Total: 2 #1", &page_tickers(2, 0), 1)]);
        let mut screener = Screener::new(ScreenerQuery::default());

        let first: Vec<String> = screener
            .fetch_all(&fetcher)
            .unwrap()
            .iter()
            .map(|row| row.ticker().clone())
            .collect();
        let second: Vec<String> = screener
            .fetch_all(&fetcher)
            .unwrap()
            .iter()
            .map(|row| row.ticker().clone())
            .collect();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn failing_page_aborts_the_listing() {
        // Second page is never served, so the fetcher reports an empty document.
        let fetcher = MockFetcher::new(vec![page("Total: 25 #1", &page_tickers(20, 0), 1)]);
        let mut screener = Screener::new(ScreenerQuery::default());

        let err = screener.fetch_all(&fetcher).unwrap_err();
        assert!(err.is_transport());
        assert!(screener.is_empty());
    }

    #[test]
    fn params_carry_filters() {
        let query = ScreenerQuery::new(
            Some(Exchange::Nasdaq),
            Some(Index::Sp500),
            Some(Signal::TopGainers),
            Order::MarketCapDesc,
        );
        let params = query.params(2);

        assert_eq!(
            params,
            vec![
                ("v", "111".to_string()),
                ("o", "-marketcap".to_string()),
                ("r", "21".to_string()),
                ("f", "exch_nasd,idx_sp500".to_string()),
                ("s", "ta_topgainers".to_string()),
            ]
        );
    }

    #[test]
    fn default_params_have_no_filters() {
        let params = ScreenerQuery::default().params(1);

        assert_eq!(
            params,
            vec![
                ("v", "111".to_string()),
                ("o", "ticker".to_string()),
                ("r", "1".to_string()),
            ]
        );
    }

    #[test]
    fn query_parses_names_and_codes() {
        let query =
            ScreenerQuery::parse(Some("nasdaq"), Some("idx_dji"), Some("NEW_HIGH"), Some("-price"))
                .unwrap();

        assert_eq!(*query.exchange(), Some(Exchange::Nasdaq));
        assert_eq!(*query.index(), Some(Index::Djia));
        assert_eq!(*query.signal(), Some(Signal::NewHigh));
        assert_eq!(*query.order(), Order::PriceDesc);
    }

    #[test]
    fn query_rejects_unknown_values() {
        let err = ScreenerQuery::parse(Some("LSE"), None, None, None).unwrap_err();
        match err {
            ValidationError::InvalidChoice {
                field,
                value,
                allowed,
            } => {
                assert_eq!(field, "exchange");
                assert_eq!(value, "LSE");
                assert_eq!(allowed, "exch_amex, exch_nasd, exch_nyse");
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = ScreenerQuery::parse(None, None, None, Some("random")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidChoice {
                field: "order_by",
                ..
            }
        ));
    }

    #[test]
    fn display_summarizes_the_listing() {
        let query = ScreenerQuery::new(Some(Exchange::Nyse), None, None, Order::default());
        let fetcher = MockFetcher::new(vec![page("Total: 2 #1", &page_tickers(2, 0), 1)]);
        let mut screener = Screener::new(query);
        screener.fetch_all(&fetcher).unwrap();

        assert_eq!(
            screener.to_string(),
            "<Screener exchange=exch_nyse, index=-, signal=-, table=111, order_by=ticker, total=2, pages=1>"
        );
    }
}
