//! In-memory branch source for tests and embedding hosts.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::mcda::BranchRecord;
use crate::ports::BranchSource;

/// Serves a fixed list of branch records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBranchSource {
    branches: Vec<BranchRecord>,
}

impl InMemoryBranchSource {
    pub fn new(branches: Vec<BranchRecord>) -> Self {
        Self { branches }
    }
}

#[async_trait]
impl BranchSource for InMemoryBranchSource {
    async fn load(&self) -> Result<Vec<BranchRecord>, DomainError> {
        Ok(self.branches.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} branches)", self.branches.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_branches() {
        let source = InMemoryBranchSource::new(vec![BranchRecord::new("A"), BranchRecord::new("B")]);

        let loaded = source.load().await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].branch_name, "B");
        assert_eq!(source.describe(), "in-memory (2 branches)");
    }

    #[tokio::test]
    async fn default_source_is_empty() {
        assert!(InMemoryBranchSource::default().load().await.unwrap().is_empty());
    }
}
