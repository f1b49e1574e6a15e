use crate::computer::{self, ReserveOutcome};
use crate::db::{connect_and_migrate, connect_sqlite_memory, DatabaseConfig};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Barrier;

async fn race(db: Arc<DatabaseConnection>, callers: usize) -> Result<Vec<ReserveOutcome>> {
    let c = computer::create(&db, "linux", "x86", 4).await?;
    let barrier = Arc::new(Barrier::new(callers));
    let mut handles = Vec::with_capacity(callers);
    for _ in 0..callers {
        let db = Arc::clone(&db);
        let barrier = Arc::clone(&barrier);
        let id = c.id;
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            computer::reserve(&db, id).await
        }));
    }
    let mut outcomes = Vec::with_capacity(callers);
    for h in handles {
        outcomes.push(h.await??);
    }
    assert!(!computer::find(&db, c.id).await?.unwrap().status);
    Ok(outcomes)
}

fn assert_single_winner(outcomes: &[ReserveOutcome]) {
    let won = outcomes.iter().filter(|o| **o == ReserveOutcome::Reserved).count();
    let lost = outcomes.iter().filter(|o| **o == ReserveOutcome::AlreadyReserved).count();
    assert_eq!(won, 1, "outcomes: {outcomes:?}");
    assert_eq!(lost, outcomes.len() - 1, "outcomes: {outcomes:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reserve_single_winner() -> Result<()> {
    let db = Arc::new(connect_sqlite_memory().await?);
    let outcomes = race(db, 16).await?;
    assert_single_winner(&outcomes);
    Ok(())
}

/// Same race against PostgreSQL with a real connection pool; runs only when `DATABASE_URL` points at one.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_reserve_single_winner_postgres() -> Result<()> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if url.starts_with("postgres") => url,
        _ => {
            eprintln!("skip: DATABASE_URL is not a postgres url");
            return Ok(());
        }
    };
    let cfg = DatabaseConfig { url, max_connections: 32, min_connections: 1, ..DatabaseConfig::default() };
    let db = match connect_and_migrate(&cfg).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(());
        }
    };
    for _ in 0..10 {
        let outcomes = race(Arc::clone(&db), 32).await?;
        assert_single_winner(&outcomes);
    }
    Ok(())
}
