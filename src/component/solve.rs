use std::io::{BufRead, Write};

use crate::context::{Context, DataConfig};
use crate::error::TaskError;
use crate::stream::{Environment, Input, Output};
use crate::tasks::Task;

use super::{Target, short_name};

/// Reads one case's input data and writes the expected answer.
pub trait Solution: Send + 'static {
    fn solve(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        config: &DataConfig,
    ) -> Result<(), TaskError>;
}

/// [`Task`] reading `{problem}{id}.in` and writing `{problem}{id}.out` with a [`Solution`].
///
/// The input file must exist when the task runs, i.e. its generator has finished.
pub struct SolveTask<S> {
    target: Target,
    component: S,
}

impl<S: Solution> SolveTask<S> {
    pub fn new(target: Target, component: S) -> Self {
        Self { target, component }
    }
}

impl<S: Solution> Task for SolveTask<S> {
    fn run(&mut self, ctx: &Context) -> Result<(), TaskError> {
        let input = Input::open(self.target.input_path(ctx.id()))?;
        let output = Output::create(self.target.output_path(ctx.id()))?;
        let mut env = Environment::new(Some(input), Some(output));

        let (input, output) = env.split()?;
        self.component.solve(input, output, ctx.config())?;
        env.finish()?;
        Ok(())
    }

    fn name(&self) -> &str {
        short_name::<S>()
    }
}
