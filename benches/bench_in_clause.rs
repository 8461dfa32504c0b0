//! Criterion measurements for IN-clause expansion on its own and for an IN lookup
//! against an in-memory `SQLite` table, at a few list sizes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rusqlite::Connection;
use sql_conn_ext::prelude::*;

const SIZES: [usize; 4] = [1, 10, 100, 500];
const ROWS: i64 = 1000;

/// Deterministic shuffled ids so every run probes the same keys.
fn shuffled_ids(len: usize) -> Vec<i64> {
    let mut ids: Vec<i64> = (1..=ROWS).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(1_234_567_890);
    ids.shuffle(&mut rng);
    ids.truncate(len);
    ids
}

fn seeded_connection() -> Connection {
    let mut conn = Connection::open_in_memory().expect("open sqlite");
    conn.execute_batch("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
        .expect("create table");
    let tx = conn.transaction().expect("begin");
    {
        let mut insert = tx
            .prepare("INSERT INTO test (id, name) VALUES (?1, ?2)")
            .expect("prepare insert");
        for id in 1..=ROWS {
            insert
                .execute(rusqlite::params![id, format!("name-{id}")])
                .expect("insert row");
        }
    }
    tx.commit().expect("commit");
    conn
}

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("in_clause_expand");
    for size in SIZES {
        let ids = shuffled_ids(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ids, |b, ids| {
            b.iter(|| {
                let mut command = Command::new("SELECT * FROM test WHERE id IN ({id})");
                let added = expand_in_clause(&mut command, "id", ids.iter().copied())
                    .expect("expand");
                black_box((command, added));
            });
        });
    }
    group.finish();
}

fn bench_sqlite_lookup(c: &mut Criterion) {
    let mut conn = seeded_connection();
    let mut group = c.benchmark_group("in_clause_sqlite_lookup");
    for size in SIZES {
        let clause = InClause::new("id", shuffled_ids(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &clause, |b, clause| {
            b.iter(|| {
                let names = conn
                    .query_with_in_clause(
                        "SELECT name FROM test WHERE id IN ({id})",
                        NO_PARAMS,
                        clause,
                        |row| -> Result<String, SqlExtError> { row.try_get("name") },
                    )
                    .expect("lookup");
                black_box(names);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_expansion, bench_sqlite_lookup);
criterion_main!(benches);
