//! # Example: result_channel
//!
//! Collecting results out-of-band: tasks receive a [`Sender`] minted from the
//! driver's receiver with [`channel::open`] and report through it. Once the
//! executor returns, every task (and its sender) is gone, so draining the
//! receiver terminates by itself.
//!
//! ## Flow
//! ```text
//! driver: (tx, rx) = channel::create(); drop(tx)
//! group factory ──► channel::open(&rx) ──► task sends (case, value)
//! TaskExecutor::execute(groups, 4)   (blocks until all tasks ran)
//! rx.iter() ──► every result, then closure
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example result_channel
//! ```

use std::collections::BTreeMap;

use multigen::{
    CaseId, Context, DataConfig, Sender, TaskError, TaskExecutor, TaskFn, TaskGroup, channel, entry,
};

fn collatz_steps(mut n: u64) -> u32 {
    let mut steps = 0;
    while n != 1 {
        n = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
        steps += 1;
    }
    steps
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = channel::create::<(CaseId, u64, u32)>();
    drop(tx);

    let groups: Vec<TaskGroup> = (1..=4u32)
        .map(|subtask| {
            let start = u64::from(subtask) * 1_000;
            let group = TaskGroup::new(Context::subtask(
                subtask,
                1,
                DataConfig::from_iter([entry("start", start), entry("count", 250)]),
            ));
            for offset in 0..4u64 {
                let rx = rx.share();
                group.add(move || {
                    let out: Sender<_> = channel::open(&rx);
                    TaskFn::boxed("collatz", move |ctx: &Context| {
                        let start: u64 = ctx.config().parse("start")?;
                        let count: u64 = ctx.config().parse("count")?;
                        for n in (start..start + count).skip(offset as usize).step_by(4) {
                            out.send((ctx.id(), n, collatz_steps(n)))
                                .map_err(|e| TaskError::fail(e.to_string()))?;
                        }
                        Ok(())
                    })
                });
            }
            group
        })
        .collect();

    let summary = TaskExecutor::new().execute(&groups, 4)?;
    println!("{summary}");

    let mut longest: BTreeMap<String, (u64, u32)> = BTreeMap::new();
    for (id, n, steps) in rx.iter() {
        let best = longest.entry(id.to_string()).or_insert((n, steps));
        if steps > best.1 {
            *best = (n, steps);
        }
    }
    for (id, (n, steps)) in &longest {
        println!("case {id}: {n} takes {steps} steps");
    }
    Ok(())
}
