use std::io::Write;

use crate::context::{Context, DataConfig};
use crate::error::TaskError;
use crate::stream::{Environment, Output};
use crate::tasks::Task;

use super::{Target, short_name};

/// Writes a case's input data and its answer in one pass, without a separate solution.
pub trait IntegratedGenerator: Send + 'static {
    fn generate(
        &mut self,
        data_in: &mut dyn Write,
        data_out: &mut dyn Write,
        config: &DataConfig,
    ) -> Result<(), TaskError>;
}

/// [`Task`] writing both `{problem}{id}.in` and `{problem}{id}.out` with an [`IntegratedGenerator`].
pub struct IntegratedTask<I> {
    target: Target,
    component: I,
}

impl<I: IntegratedGenerator> IntegratedTask<I> {
    pub fn new(target: Target, component: I) -> Self {
        Self { target, component }
    }
}

impl<I: IntegratedGenerator> Task for IntegratedTask<I> {
    fn run(&mut self, ctx: &Context) -> Result<(), TaskError> {
        let mut data_in =
            Environment::new(None, Some(Output::create(self.target.input_path(ctx.id()))?));
        let mut data_out =
            Environment::new(None, Some(Output::create(self.target.output_path(ctx.id()))?));

        self.component
            .generate(data_in.output()?, data_out.output()?, ctx.config())?;
        data_in.finish()?;
        data_out.finish()?;
        Ok(())
    }

    fn name(&self) -> &str {
        short_name::<I>()
    }
}
