use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use splitledger_engine::{
    EngineConfig, Expense, ExpenseManager, InMemoryUserDirectory, Money, Split, SplitPolicy, User,
    UserId,
};

fn setup(participants: usize) -> (ExpenseManager<Arc<InMemoryUserDirectory>>, Vec<UserId>) {
    let dir = Arc::new(InMemoryUserDirectory::new());
    let users = (0..participants)
        .map(|i| dir.register(User::new(format!("bench-{i}"))))
        .collect();
    (ExpenseManager::new(dir, EngineConfig::default()), users)
}

fn bench_add_expense(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_expense");

    for participants in [2usize, 8, 32] {
        let (mgr, users) = setup(participants);
        group.throughput(Throughput::Elements(participants as u64));
        group.bench_with_input(
            BenchmarkId::new("equal", participants),
            &participants,
            |b, _| {
                b.iter(|| {
                    let splits = users.iter().map(|u| Split::equal(*u)).collect();
                    let expense = Expense::new(
                        users[0],
                        Money::new(dec!(123.45)),
                        "bench",
                        SplitPolicy::Equal,
                        splits,
                    );
                    black_box(mgr.add_expense(expense).unwrap())
                })
            },
        );
    }

    group.finish();
}

fn bench_balance_queries(c: &mut Criterion) {
    let (mgr, users) = setup(32);
    for payer in &users {
        let splits = users.iter().map(|u| Split::equal(*u)).collect();
        let expense = Expense::new(*payer, Money::new(dec!(64)), "seed", SplitPolicy::Equal, splits);
        mgr.add_expense(expense).unwrap();
    }

    c.bench_function("balances_for", |b| {
        b.iter(|| black_box(mgr.balances_for(users[0]).unwrap()))
    });
    c.bench_function("all_debts", |b| b.iter(|| black_box(mgr.all_debts().unwrap())));
}

criterion_group!(benches, bench_add_expense, bench_balance_queries);
criterion_main!(benches);
