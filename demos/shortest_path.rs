//! # Example: shortest_path
//!
//! Two subtasks of an undirected weighted graph problem: random connected
//! graphs (subtask 1) and grid graphs (subtask 2). The solution runs
//! Dijkstra from vertex 1 to vertex n.
//!
//! ## Flow
//! ```text
//! Template("graph")
//!   ├─► subtask 1: RandomGraphGenerator ─┐
//!   ├─► subtask 2: GridGraphGenerator   ─┼─► data/graph{s}-{i}.in
//!   └─► ShortestPathSolution            ─┴─► data/graph{s}-{i}.out
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --release --example shortest_path
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io::{BufRead, Read, Write};

use multigen::{Config, Context, DataConfig, Generator, Solution, TaskError, Template, entry};
use rand::Rng;

#[derive(Default)]
struct RandomGraphGenerator;

impl Generator for RandomGraphGenerator {
    fn generate(&mut self, data: &mut dyn Write, config: &DataConfig) -> Result<(), TaskError> {
        let vertices: usize = config.parse("vertex_count")?;
        let max_edges: usize = config.parse("max_edge_count")?;
        let max_weight: u64 = config.parse("max_weight")?;
        if vertices < 2 || max_edges < vertices - 1 {
            return Err(TaskError::fail("a connected graph needs n >= 2 and m >= n - 1"));
        }

        let mut rng = rand::rng();
        writeln!(data, "{vertices} {max_edges}")?;
        // a random spanning tree keeps the graph connected
        for v in 2..=vertices {
            let parent = rng.random_range(1..v);
            writeln!(data, "{parent} {v} {}", rng.random_range(1..=max_weight))?;
        }
        for _ in vertices - 1..max_edges {
            let x = rng.random_range(1..=vertices);
            let y = rng.random_range(1..=vertices);
            writeln!(data, "{x} {y} {}", rng.random_range(1..=max_weight))?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct GridGraphGenerator;

impl Generator for GridGraphGenerator {
    fn generate(&mut self, data: &mut dyn Write, config: &DataConfig) -> Result<(), TaskError> {
        let vertices: usize = config.parse("vertex_count")?;
        let max_weight: u64 = config.parse("max_weight")?;
        if vertices == 0 {
            return Err(TaskError::fail("vertex_count must be positive"));
        }

        let rows = vertices.isqrt();
        let columns = vertices.div_ceil(rows);
        let id = |r: usize, c: usize| r * columns + c + 1;

        let mut rng = rand::rng();
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..columns {
                let here = id(r, c);
                if here > vertices {
                    continue;
                }
                if c + 1 < columns && id(r, c + 1) <= vertices {
                    edges.push((here, id(r, c + 1), rng.random_range(1..=max_weight)));
                }
                if r + 1 < rows && id(r + 1, c) <= vertices {
                    edges.push((here, id(r + 1, c), rng.random_range(1..=max_weight)));
                }
            }
        }

        writeln!(data, "{vertices} {}", edges.len())?;
        for (x, y, w) in edges {
            writeln!(data, "{x} {y} {w}")?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct ShortestPathSolution;

impl ShortestPathSolution {
    fn dijkstra(graph: &[Vec<(usize, u64)>], from: usize, to: usize) -> Option<u64> {
        let mut dist = vec![u64::MAX; graph.len()];
        let mut heap = BinaryHeap::new();
        dist[from] = 0;
        heap.push(Reverse((0u64, from)));

        while let Some(Reverse((d, x))) = heap.pop() {
            if d > dist[x] {
                continue;
            }
            for &(y, w) in &graph[x] {
                let nd = d + w;
                if nd < dist[y] {
                    dist[y] = nd;
                    heap.push(Reverse((nd, y)));
                }
            }
        }
        (dist[to] != u64::MAX).then_some(dist[to])
    }
}

impl Solution for ShortestPathSolution {
    fn solve(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        _: &DataConfig,
    ) -> Result<(), TaskError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        let mut numbers = text.split_ascii_whitespace().map(str::parse::<u64>);
        let mut next = || -> Result<u64, TaskError> {
            numbers
                .next()
                .ok_or_else(|| TaskError::fail("unexpected end of input"))?
                .map_err(|e| TaskError::fail(e.to_string()))
        };

        let vertices = next()? as usize;
        let edges = next()? as usize;
        if vertices == 0 {
            return Err(TaskError::fail("graph has no vertices"));
        }
        let mut graph = vec![Vec::new(); vertices + 1];
        for _ in 0..edges {
            let (x, y, w) = (next()? as usize, next()? as usize, next()?);
            if x > vertices || y > vertices {
                return Err(TaskError::fail(format!("edge {x}-{y} out of range")));
            }
            graph[x].push((y, w));
            graph[y].push((x, w));
        }

        match Self::dijkstra(&graph, 1, vertices) {
            Some(d) => writeln!(output, "{d}")?,
            None => writeln!(output, "-1")?,
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default().with_output_dir("data");
    std::fs::create_dir_all(&config.output_dir)?;

    let mut template = Template::new("graph");
    for i in 1..=10u32 {
        let n = i as usize * 10_000;
        let case = || {
            DataConfig::from_iter([
                entry("vertex_count", n),
                entry("max_edge_count", n * 5),
                entry("max_weight", 10_000),
            ])
        };
        template.add::<RandomGraphGenerator, ShortestPathSolution>(Context::subtask(1, i, case()));
        template.add::<GridGraphGenerator, ShortestPathSolution>(Context::subtask(2, i, case()));
    }

    let summary = template.execute_with(&config)?;
    println!("{summary} on {} workers", config.worker_count());
    for failure in &summary.failures {
        eprintln!("  {failure}");
    }
    Ok(())
}
