use findex::{
    DocKey, Document, DocumentIndex, IndexConfig, SearchRequest, TokenizeMode, TokenizerConfig,
};

fn config() -> IndexConfig {
    IndexConfig::builder()
        .add_indexed_field("title", TokenizeMode::Forward)
        .add_stored_field("href")
        .tokenizer(TokenizerConfig::default().min_length(2))
        .build()
        .unwrap()
}

#[test]
fn test_idempotent_add() {
    let mut index = DocumentIndex::new(config()).unwrap();
    index.add(
        Document::new(1u64)
            .add_text("title", "Alert")
            .add_text("href", "/old/"),
    );
    index.add(
        Document::new(1u64)
            .add_text("title", "Alert")
            .add_text("href", "/new/"),
    );

    assert_eq!(index.len(), 1);

    // Latest payload wins, and postings hold the key exactly once.
    let results = index.search(&SearchRequest::new("alert"));
    assert_eq!(results.total_hits, 1);
    let payload = results.hits[0].payload.as_ref().unwrap();
    assert_eq!(payload.get("href").and_then(|v| v.as_text()), Some("/new/"));
}

#[test]
fn test_round_trip_removal_is_indistinguishable() {
    let mut touched = DocumentIndex::new(config()).unwrap();
    let mut untouched = DocumentIndex::new(config()).unwrap();

    let keeper = |key: u64| {
        Document::new(key)
            .tag("en")
            .add_text("title", "Badge")
            .add_text("href", "/docs/badge/")
    };
    touched.add(keeper(1));
    untouched.add(keeper(1));

    touched.add(
        Document::new(2u64)
            .tag("fr")
            .add_text("title", "Alert transient")
            .add_text("href", "/tmp/"),
    );
    assert!(touched.remove(&DocKey::Int(2)));

    for query in ["alert", "transient", "badge", "ba", "tr"] {
        let a = touched.search(&SearchRequest::new(query));
        let b = untouched.search(&SearchRequest::new(query));
        assert_eq!(a.keys(), b.keys(), "query {query}");
    }
    assert!(touched.search(&SearchRequest::new("badge").tag("fr")).is_empty());
    assert_eq!(touched.len(), untouched.len());
    assert_eq!(touched.stats().term_count, untouched.stats().term_count);
    assert_eq!(touched.stats().tag_count, untouched.stats().tag_count);
}

#[test]
fn test_update_changes_tag_membership() {
    let mut index = DocumentIndex::new(config()).unwrap();
    index.add(Document::new(1u64).tag("en").add_text("title", "Alert"));
    index.update(Document::new(1u64).tag("fr").add_text("title", "Alert"));

    assert!(index.search(&SearchRequest::new("alert").tag("en")).is_empty());
    assert_eq!(
        index.search(&SearchRequest::new("alert").tag("fr")).keys(),
        vec![DocKey::Int(1)]
    );
}

#[test]
fn test_update_bumps_recency() {
    let mut index = DocumentIndex::new(config()).unwrap();
    index.add(Document::new(1u64).add_text("title", "alert"));
    index.add(Document::new(2u64).add_text("title", "alert"));

    // Doc 2 is newest, so it ranks first.
    assert_eq!(
        index.search(&SearchRequest::new("alert")).keys(),
        vec![DocKey::Int(2), DocKey::Int(1)]
    );

    // Re-adding doc 1 makes it the most recent again.
    index.add(Document::new(1u64).add_text("title", "alert"));
    assert_eq!(
        index.search(&SearchRequest::new("alert")).keys(),
        vec![DocKey::Int(1), DocKey::Int(2)]
    );
}

#[test]
fn test_replayed_operations_converge() {
    // Independent copies fed the same mutation sequence answer queries
    // identically; this is the cross-worker consistency model.
    let ops: Vec<(&str, u64, &str)> = vec![
        ("add", 1, "Alert"),
        ("add", 2, "Badge"),
        ("add", 1, "Alert updated"),
        ("remove", 2, ""),
        ("add", 3, "Card"),
    ];

    let mut replica_a = DocumentIndex::new(config()).unwrap();
    let mut replica_b = DocumentIndex::new(config()).unwrap();
    for replica in [&mut replica_a, &mut replica_b] {
        for (op, key, title) in &ops {
            match *op {
                "add" => replica.add(Document::new(*key).add_text("title", *title)),
                "remove" => {
                    replica.remove(&DocKey::Int(*key));
                }
                _ => unreachable!(),
            }
        }
    }

    for query in ["alert", "updated", "badge", "card"] {
        assert_eq!(
            replica_a.search(&SearchRequest::new(query)).keys(),
            replica_b.search(&SearchRequest::new(query)).keys(),
            "query {query}"
        );
    }
}

#[test]
fn test_string_keys() {
    let mut index = DocumentIndex::new(config()).unwrap();
    index.add(Document::new("docs/alert").add_text("title", "Alert"));

    let results = index.search(&SearchRequest::new("alert"));
    assert_eq!(results.keys(), vec![DocKey::Text("docs/alert".into())]);

    assert!(index.remove(&DocKey::Text("docs/alert".into())));
    assert!(index.is_empty());
}
