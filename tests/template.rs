use std::fs;
use std::io::{BufRead, Write};
use std::sync::Arc;

use multigen::{
    Context, DataConfig, Event, EventKind, Generator, Solution, Subscribe, SubscriberSet,
    TaskError, Template, entry,
};
use parking_lot::Mutex;

#[derive(Default)]
struct RangeGenerator;

impl Generator for RangeGenerator {
    fn generate(&mut self, data: &mut dyn Write, config: &DataConfig) -> Result<(), TaskError> {
        let n: u32 = config.parse("n")?;
        let values: Vec<String> = (1..=n).map(|v| v.to_string()).collect();
        writeln!(data, "{n}")?;
        writeln!(data, "{}", values.join(" "))?;
        Ok(())
    }
}

#[derive(Default)]
struct SumSolution;

impl Solution for SumSolution {
    fn solve(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        _config: &DataConfig,
    ) -> Result<(), TaskError> {
        let mut lines = input.lines();
        let _count = lines.next().transpose()?;
        let sum: u64 = lines
            .next()
            .transpose()?
            .unwrap_or_default()
            .split_whitespace()
            .map(|t| t.parse::<u64>().map_err(|e| TaskError::fail(e.to_string())))
            .sum::<Result<u64, _>>()?;
        writeln!(output, "{sum}")?;
        Ok(())
    }
}

#[derive(Default)]
struct Kinds(Mutex<Vec<EventKind>>);

impl Subscribe for Kinds {
    fn on_event(&self, event: &Event) {
        self.0.lock().push(event.kind);
    }

    fn name(&self) -> &'static str {
        "kinds"
    }
}

#[test]
fn test_subtasks_produce_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut template = Template::new("range");
    template.output_dir(dir.path());

    for subtask in 1..=2u32 {
        for index in 1..=5u32 {
            let n = subtask * 100 + index;
            template.add::<RangeGenerator, SumSolution>(Context::subtask(
                subtask,
                index,
                DataConfig::from_iter([entry("n", n)]),
            ));
        }
    }

    let summary = template.execute(3).unwrap();
    assert!(summary.is_success(), "{:?}", summary.failures);
    assert_eq!(summary.total, 20);

    let answer = fs::read_to_string(dir.path().join("range2-5.out")).unwrap();
    let n = 205u64;
    assert_eq!(answer.trim().parse::<u64>().unwrap(), n * (n + 1) / 2);
}

#[test]
fn test_subscribers_observe_both_phases() {
    let dir = tempfile::tempdir().unwrap();
    let kinds = Arc::new(Kinds::default());
    let subs = Arc::new(SubscriberSet::new(vec![kinds.clone() as Arc<dyn Subscribe>]));

    let mut template = Template::new("range");
    template
        .output_dir(dir.path())
        .with_subscribers(Arc::clone(&subs))
        .add::<RangeGenerator, SumSolution>(Context::normal(1, DataConfig::from_iter([entry("n", 3)])));
    template.execute(2).unwrap();

    drop(template);
    subs.close();

    let seen = kinds.0.lock();
    let count = |k: EventKind| seen.iter().filter(|&&e| e == k).count();
    assert_eq!(count(EventKind::PoolStarted), 2);
    assert_eq!(count(EventKind::PoolStopped), 2);
    assert_eq!(count(EventKind::BatchSubmitted), 2);
    assert_eq!(count(EventKind::TaskStarting), 2);
    assert_eq!(count(EventKind::TaskStopped), 2);
    assert_eq!(count(EventKind::TaskFailed), 0);
}
