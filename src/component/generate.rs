use std::io::Write;

use crate::context::{Context, DataConfig};
use crate::error::TaskError;
use crate::stream::{Environment, Output};
use crate::tasks::Task;

use super::{Target, short_name};

/// Writes the input data of one case.
pub trait Generator: Send + 'static {
    fn generate(&mut self, data: &mut dyn Write, config: &DataConfig) -> Result<(), TaskError>;
}

/// [`Task`] writing `{problem}{id}.in` with a [`Generator`].
pub struct GenerateTask<G> {
    target: Target,
    component: G,
}

impl<G: Generator> GenerateTask<G> {
    pub fn new(target: Target, component: G) -> Self {
        Self { target, component }
    }
}

impl<G: Generator> Task for GenerateTask<G> {
    fn run(&mut self, ctx: &Context) -> Result<(), TaskError> {
        let path = self.target.input_path(ctx.id());
        let mut env = Environment::new(None, Some(Output::create(path)?));
        self.component.generate(env.output()?, ctx.config())?;
        env.finish()?;
        Ok(())
    }

    fn name(&self) -> &str {
        short_name::<G>()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::component::testing::AddGenerator;
    use crate::context::entry;

    #[test]
    fn test_writes_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::subtask(1, 1, DataConfig::from_iter([entry("a", 1), entry("b", 2)]));

        let mut task = GenerateTask::new(Target::new("add", dir.path()), AddGenerator);
        task.run(&ctx).unwrap();

        let text = fs::read_to_string(dir.path().join("add1-1.in")).unwrap();
        assert_eq!(text, "1 2\n");
        assert_eq!(task.name(), "AddGenerator");
    }

    #[test]
    fn test_missing_key_fails_task() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::normal(7, DataConfig::from_iter([entry("a", 1)]));

        let mut task = GenerateTask::new(Target::new("add", dir.path()), AddGenerator);
        let err = task.run(&ctx).unwrap_err();
        assert_eq!(err.as_label(), "task_config");
    }

    #[test]
    fn test_unwritable_directory_fails_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::normal(1, DataConfig::from_iter([entry("a", 1), entry("b", 2)]));

        let target = Target::new("add", dir.path().join("missing"));
        let err = GenerateTask::new(target, AddGenerator).run(&ctx).unwrap_err();
        assert_eq!(err.as_label(), "task_stream");
    }
}
