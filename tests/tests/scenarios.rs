use giron_api::{CollectionPath, Error, NewAnswer, Query, Store};
use giron_client::{post_answer, post_question};
use tests::LiveBoard;

#[tokio::test]
async fn posted_questions_appear_newest_first() {
    let mut live = LiveBoard::start().await;
    post_question(&*live.store, "X?").await.unwrap();
    live.pump();
    assert_eq!(live.question_texts(), ["X?"]);

    // Timestamps have millisecond resolution; keep the two posts apart
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    post_question(&*live.store, "Y?").await.unwrap();
    live.pump();
    assert_eq!(live.question_texts(), ["Y?", "X?"]);
}

#[tokio::test]
async fn empty_submissions_produce_no_store_write() {
    let mut live = LiveBoard::start().await;
    for text in ["", "   ", "\n\t"] {
        assert_eq!(
            post_question(&*live.store, text).await,
            Err(Error::EmptySubmission)
        );
    }
    assert_eq!(live.store.test_doc_count(&CollectionPath::questions()), 0);

    post_question(&*live.store, "real").await.unwrap();
    live.pump();
    let question = live.board.questions[0].id;
    assert_eq!(
        post_answer(&*live.store, question, "  ").await,
        Err(Error::EmptySubmission)
    );
    assert_eq!(
        live.store.test_doc_count(&Query::answers_of(question).path),
        0
    );
}

#[tokio::test]
async fn ask_expand_answer_collapse_reexpand() {
    let mut live = LiveBoard::start().await;
    post_question(&*live.store, "What is O(n log n) sorting?")
        .await
        .unwrap();
    live.pump();
    assert_eq!(live.question_texts(), ["What is O(n log n) sorting?"]);
    let question = live.board.questions[0].id;

    // Expand: answer list present but empty
    live.feeds.toggle(question).await.unwrap();
    live.pump();
    assert_eq!(live.board.answers_for(question), Some(&[][..]));

    // Answer appears as the sole entry through the live query
    post_answer(&*live.store, question, "Use mergesort")
        .await
        .unwrap();
    live.pump();
    assert_eq!(live.answer_texts(), ["Use mergesort"]);

    // Collapse clears the view model, not the store
    live.feeds.toggle(question).await.unwrap();
    live.pump();
    assert_eq!(live.board.answers_for(question), None);
    assert_eq!(
        live.store.test_doc_count(&Query::answers_of(question).path),
        1
    );

    // Re-expanding re-fetches the answers from the store
    live.feeds.toggle(question).await.unwrap();
    live.pump();
    assert_eq!(live.answer_texts(), ["Use mergesort"]);
}

#[tokio::test]
async fn answers_stay_oldest_first_whatever_the_write_order() {
    let mut live = LiveBoard::start().await;
    post_question(&*live.store, "q").await.unwrap();
    live.pump();
    let question = live.board.questions[0].id;
    live.feeds.toggle(question).await.unwrap();

    // Write the newer answer before the older one
    let path = Query::answers_of(question).path;
    let mut newer = NewAnswer::new("newer").unwrap();
    let mut older = NewAnswer::new("older").unwrap();
    older.created_at = older.created_at - chrono::Duration::seconds(30);
    newer.created_at = newer.created_at - chrono::Duration::seconds(10);
    live.store.create(&path, newer.fields()).await.unwrap();
    live.store.create(&path, older.fields()).await.unwrap();

    live.pump();
    assert_eq!(live.answer_texts(), ["older", "newer"]);
}

#[tokio::test]
async fn only_the_latest_expansion_keeps_a_live_feed() {
    let mut live = LiveBoard::start().await;
    post_question(&*live.store, "A").await.unwrap();
    post_question(&*live.store, "B").await.unwrap();
    live.pump();
    let (b, a) = (live.board.questions[0].id, live.board.questions[1].id);

    live.feeds.toggle(a).await.unwrap();
    live.feeds.toggle(b).await.unwrap();
    live.pump();

    assert!(live.board.is_expanded(b));
    assert_eq!(live.store.test_subscriber_count(&Query::answers_of(a).path), 0);
    assert_eq!(live.store.test_subscriber_count(&Query::answers_of(b).path), 1);
}

#[tokio::test]
async fn a_flaky_store_surfaces_errors_and_recovers() {
    let mut live = LiveBoard::start().await;
    live.store.set_offline(true);
    assert_eq!(
        post_question(&*live.store, "lost?").await,
        Err(Error::Disconnected)
    );
    assert_eq!(live.store.test_doc_count(&CollectionPath::questions()), 0);

    live.store.set_offline(false);
    post_question(&*live.store, "retried").await.unwrap();
    live.pump();
    assert_eq!(live.question_texts(), ["retried"]);
}
