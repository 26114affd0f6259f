use std::fmt;

use super::DataConfig;

/// Identity of one test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseId {
    /// A stand-alone case, rendered as `"{index}"`.
    Normal { index: u32 },
    /// A case inside a numbered subtask, rendered as `"{subtask}-{index}"`.
    Subtask { subtask: u32, index: u32 },
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseId::Normal { index } => write!(f, "{index}"),
            CaseId::Subtask { subtask, index } => write!(f, "{subtask}-{index}"),
        }
    }
}

/// Read-only identity and configuration shared by every task of a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    id: CaseId,
    config: DataConfig,
}

impl Context {
    #[must_use]
    pub fn new(id: CaseId, config: DataConfig) -> Self {
        Self { id, config }
    }

    /// Context of a stand-alone case.
    #[must_use]
    pub fn normal(index: u32, config: DataConfig) -> Self {
        Self::new(CaseId::Normal { index }, config)
    }

    /// Context of case `index` within `subtask`.
    #[must_use]
    pub fn subtask(subtask: u32, index: u32, config: DataConfig) -> Self {
        Self::new(CaseId::Subtask { subtask, index }, config)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> CaseId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DataConfig {
        &self.config
    }
}
