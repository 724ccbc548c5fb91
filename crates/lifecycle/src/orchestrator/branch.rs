//! Branch-level cascade. The owning company and its manager are not touched.

use std::sync::Arc;

use async_trait::async_trait;
use error::Result;

use super::{execute, unexpected_shape, CascadeOrchestrator};
use crate::{
    graph::{BranchNode, SubtreeGraph},
    kinds::AggregateKind,
    plan::{CascadePlan, CascadeReport, PlanBuilder},
    store::LifecycleStore,
};

pub struct BranchCascade {
    store: Arc<dyn LifecycleStore>,
}

impl BranchCascade {
    pub fn new(store: Arc<dyn LifecycleStore>) -> Self {
        Self {
            store,
        }
    }

    pub fn plan(branch: &BranchNode, acting_user_id: Option<i32>) -> CascadePlan {
        let mut builder = PlanBuilder::new(acting_user_id);
        builder.add_branch(branch);
        builder.build(AggregateKind::Branch, branch.id)
    }
}

#[async_trait]
impl CascadeOrchestrator for BranchCascade {
    fn aggregate(&self) -> AggregateKind { AggregateKind::Branch }

    async fn run(&self, root_id: i32, acting_user_id: Option<i32>) -> Result<Option<CascadeReport>> {
        execute(&self.store, AggregateKind::Branch, root_id, acting_user_id, move |graph| {
            match graph {
                SubtreeGraph::Branch(branch) => Ok(BranchCascade::plan(&branch, acting_user_id)),
                other => Err(unexpected_shape(AggregateKind::Branch, &other)),
            }
        })
        .await
    }
}
