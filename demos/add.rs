//! # Example: add
//!
//! The A + B problem: 20 random cases generated and answered on 8 workers,
//! with every pool and task event printed by [`LogWriter`].
//!
//! ## Flow
//! ```text
//! Template("add")
//!   ├─► phase 1: AddGenerator  ──► data/add{0..19}.in
//!   └─► phase 2: AddSolution   ──► data/add{0..19}.out
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example add --features logging
//! ```

use std::io::{BufRead, Write};
use std::sync::Arc;

use multigen::{
    Context, DataConfig, Generator, LogWriter, Solution, Subscribe, SubscriberSet, TaskError,
    Template, entry,
};
use rand::Rng;

const WORKERS: usize = 8;
const CASES: u32 = 20;

#[derive(Default)]
struct AddGenerator;

impl Generator for AddGenerator {
    fn generate(&mut self, data: &mut dyn Write, config: &DataConfig) -> Result<(), TaskError> {
        let min: i64 = config.parse("min_value")?;
        let max: i64 = config.parse("max_value")?;

        let mut rng = rand::rng();
        writeln!(
            data,
            "{} {}",
            rng.random_range(min..=max),
            rng.random_range(min..=max)
        )?;
        Ok(())
    }
}

#[derive(Default)]
struct AddSolution;

impl Solution for AddSolution {
    fn solve(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        _: &DataConfig,
    ) -> Result<(), TaskError> {
        let mut line = String::new();
        input.read_line(&mut line)?;
        let operands = line
            .split_whitespace()
            .map(str::parse::<i64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TaskError::fail(e.to_string()))?;
        writeln!(output, "{}", operands.iter().sum::<i64>())?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("data")?;

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let subs = Arc::new(SubscriberSet::new(subs));

    let mut template = Template::new("add");
    template.output_dir("data").with_subscribers(Arc::clone(&subs));
    for i in 0..CASES {
        let base = i64::from(i) * 1_000_000;
        template.add::<AddGenerator, AddSolution>(Context::normal(
            i,
            DataConfig::from_iter([
                entry("min_value", base),
                entry("max_value", base + 1_000_000),
            ]),
        ));
    }

    let summary = template.execute(WORKERS)?;
    subs.close();

    println!("{summary}");
    for failure in &summary.failures {
        eprintln!("  {failure}");
    }
    Ok(())
}
