#[cfg(test)]
mod fetcher_tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use tokio::sync::oneshot;

    use uptown::fetcher::FetchState;
    use uptown::listing::{decode_details, FetchError, ListingSource, USER_FACING_ERROR};
    use uptown::{PropertyFetcher, PropertyRecord};

    type Reply = Result<PropertyRecord, FetchError>;

    /// Answers each identifier only once the test releases its reply.
    #[derive(Default)]
    struct ScriptedSource {
        calls: AtomicUsize,
        pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    impl ScriptedSource {
        fn expect(&self, id: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().insert(id.to_string(), rx);
            tx
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ListingSource for ScriptedSource {
        async fn fetch_details(&self, id: &str) -> Result<PropertyRecord, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self
                .pending
                .lock()
                .unwrap()
                .remove(id)
                .expect("unexpected identifier");
            reply.await.expect("reply dropped")
        }
    }

    fn record(id: &str, area: &str) -> PropertyRecord {
        let body = json!({
            "id": id,
            "title": "",
            "price_min": "150",
            "price_max": "300",
            "size_min": "100",
            "size_max": "200",
            "type": "Plot",
            "area": area,
            "connections": [],
            "persons": [],
        });
        decode_details(body.to_string().as_bytes()).unwrap()
    }

    fn fetcher_with(source: &Arc<ScriptedSource>) -> PropertyFetcher {
        PropertyFetcher::new(source.clone())
    }

    #[tokio::test]
    async fn missing_identifier_never_hits_the_network() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);

        for id in [None, Some("")] {
            assert!(fetcher.load(id).is_none());
            assert_eq!(fetcher.state(), FetchState::Empty);
            assert_eq!(fetcher.settled().await, FetchState::Empty);
        }
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn identifier_is_sent_untouched() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);

        for id in [" 12 ", "   ", "a&b"] {
            let reply = source.expect(id);
            let handle = fetcher.load(Some(id)).unwrap();
            assert_eq!(fetcher.identifier().as_deref(), Some(id));
            reply.send(Ok(record(id, "Sector 18"))).unwrap();
            handle.await.unwrap();
            assert_eq!(fetcher.state(), FetchState::Succeeded(record(id, "Sector 18")));
        }
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn success_publishes_the_parsed_record() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);
        let reply = source.expect("12");

        let handle = fetcher.load(Some("12")).unwrap();
        assert_eq!(fetcher.state(), FetchState::Pending);

        reply.send(Ok(record("12", "Sector 18"))).unwrap();
        handle.await.unwrap();

        assert_eq!(
            fetcher.settled().await,
            FetchState::Succeeded(record("12", "Sector 18"))
        );
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn failures_surface_only_the_generic_message() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);

        let failures = vec![
            FetchError::Status(StatusCode::NOT_FOUND),
            FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR),
            decode_details(b"null").unwrap_err(),
            decode_details(b"42").unwrap_err(),
            decode_details(b"\"x\"").unwrap_err(),
            decode_details(b"not json").unwrap_err(),
        ];

        for failure in failures {
            let reply = source.expect("7");
            let handle = fetcher.load(Some("7")).unwrap();
            reply.send(Err(failure)).unwrap();
            handle.await.unwrap();

            assert_eq!(
                fetcher.state(),
                FetchState::Failed(USER_FACING_ERROR.to_string())
            );
        }
    }

    #[tokio::test]
    async fn latest_identifier_wins_over_late_response() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);
        let reply_a = source.expect("A");
        let reply_b = source.expect("B");

        let handle_a = fetcher.load(Some("A")).unwrap();
        let handle_b = fetcher.load(Some("B")).unwrap();

        reply_b.send(Ok(record("B", "Model Town"))).unwrap();
        handle_b.await.unwrap();
        assert_eq!(fetcher.state(), FetchState::Succeeded(record("B", "Model Town")));

        // A resolves after B and must be dropped.
        reply_a.send(Ok(record("A", "Sector 13"))).unwrap();
        handle_a.await.unwrap();

        assert_eq!(fetcher.state(), FetchState::Succeeded(record("B", "Model Town")));
        assert_eq!(fetcher.identifier().as_deref(), Some("B"));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn stale_failure_does_not_replace_pending_cycle() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);
        let reply_a = source.expect("A");
        let reply_b = source.expect("B");

        let handle_a = fetcher.load(Some("A")).unwrap();
        let handle_b = fetcher.load(Some("B")).unwrap();

        reply_a
            .send(Err(FetchError::Status(StatusCode::BAD_GATEWAY)))
            .unwrap();
        handle_a.await.unwrap();
        assert_eq!(fetcher.state(), FetchState::Pending);

        reply_b.send(Ok(record("B", "Huda Sector 11"))).unwrap();
        handle_b.await.unwrap();
        assert_eq!(
            fetcher.settled().await,
            FetchState::Succeeded(record("B", "Huda Sector 11"))
        );
    }

    #[tokio::test]
    async fn clearing_the_identifier_discards_in_flight_fetch() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);
        let reply = source.expect("A");

        let handle = fetcher.load(Some("A")).unwrap();
        assert!(fetcher.load(None).is_none());

        reply.send(Ok(record("A", "Sector 13"))).unwrap();
        handle.await.unwrap();

        assert_eq!(fetcher.state(), FetchState::Empty);
        assert_eq!(fetcher.identifier(), None);
    }

    #[tokio::test]
    async fn same_identifier_is_not_fetched_twice() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);
        let reply = source.expect("12");

        let handle = fetcher.set_identifier(Some("12")).unwrap();
        assert!(fetcher.set_identifier(Some("12")).is_none());

        reply.send(Ok(record("12", "Sector 18"))).unwrap();
        handle.await.unwrap();
        assert!(fetcher.set_identifier(Some("12")).is_none());
        assert_eq!(source.calls(), 1);

        // An explicit reload always starts over.
        let reply = source.expect("12");
        let handle = fetcher.load(Some("12")).unwrap();
        assert_eq!(fetcher.state(), FetchState::Pending);
        reply.send(Ok(record("12", "Sector 18"))).unwrap();
        handle.await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn subscribers_see_pending_then_result() {
        let source = Arc::new(ScriptedSource::default());
        let fetcher = fetcher_with(&source);
        let mut receiver = fetcher.subscribe();
        let reply = source.expect("9");

        let handle = fetcher.load(Some("9")).unwrap();
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().state, FetchState::Pending);

        reply.send(Ok(record("9", "GT Road"))).unwrap();
        handle.await.unwrap();
        receiver.changed().await.unwrap();

        let cycle = receiver.borrow_and_update().clone();
        assert_eq!(cycle.identifier.as_deref(), Some("9"));
        assert!(cycle.state.record().is_some());
    }
}
