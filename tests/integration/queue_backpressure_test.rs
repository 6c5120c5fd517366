// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::time::Duration;
use tldwhois::domain::models::WhoisResult;
use tldwhois::queue::result_queue::result_queue;
use tldwhois::workers::CompletionBarrier;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_producers_never_exceed_capacity_and_nothing_is_dropped() {
    const PRODUCERS: usize = 40;
    const CAPACITY: usize = 4;

    let (tx, mut rx) = result_queue(CAPACITY);
    let barrier = CompletionBarrier::new();

    for i in 0..PRODUCERS {
        let guard = barrier.register();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _guard = guard;
            tx.put(WhoisResult::new(format!("tld{}", i), format!("whois.tld{}.example", i)))
                .await
                .unwrap();
        });
    }

    let observer = tx.clone();
    drop(tx);

    let consumer = tokio::spawn(async move {
        let mut seen = HashSet::new();
        let mut max_pending = 0;
        loop {
            max_pending = max_pending.max(observer.pending());
            match tokio::time::timeout(Duration::from_secs(5), rx.get()).await {
                Ok(Some(result)) => {
                    assert!(seen.insert(result.domain), "result delivered twice");
                    // Drain at a fixed, slower rate than the producers.
                    tokio::time::sleep(Duration::from_millis(2)).await;
                }
                Ok(None) => break,
                Err(_) => panic!("consumer stalled"),
            }
            if seen.len() == PRODUCERS {
                break;
            }
        }
        (seen, max_pending)
    });

    barrier.wait().await;
    let (seen, max_pending) = consumer.await.unwrap();

    assert_eq!(seen.len(), PRODUCERS);
    assert!(max_pending <= CAPACITY, "pending {} exceeded capacity", max_pending);
    assert!(max_pending > 0);
}
