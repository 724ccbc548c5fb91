//! Zone-level cascade.
//!
//! Items, inventories and their facts, then the zone. The zone manager is
//! deactivated unless they are the acting user.

use std::sync::Arc;

use async_trait::async_trait;
use error::Result;

use super::{execute, unexpected_shape, CascadeOrchestrator};
use crate::{
    graph::{SubtreeGraph, ZoneNode},
    kinds::AggregateKind,
    plan::{CascadePlan, CascadeReport, PlanBuilder},
    store::LifecycleStore,
};

pub struct ZoneCascade {
    store: Arc<dyn LifecycleStore>,
}

impl ZoneCascade {
    pub fn new(store: Arc<dyn LifecycleStore>) -> Self {
        Self {
            store,
        }
    }

    pub fn plan(zone: &ZoneNode, acting_user_id: Option<i32>) -> CascadePlan {
        let mut builder = PlanBuilder::new(acting_user_id);
        builder.add_zone(zone);
        builder.build(AggregateKind::Zone, zone.id)
    }
}

#[async_trait]
impl CascadeOrchestrator for ZoneCascade {
    fn aggregate(&self) -> AggregateKind { AggregateKind::Zone }

    async fn run(&self, root_id: i32, acting_user_id: Option<i32>) -> Result<Option<CascadeReport>> {
        execute(&self.store, AggregateKind::Zone, root_id, acting_user_id, move |graph| {
            match graph {
                SubtreeGraph::Zone(zone) => Ok(ZoneCascade::plan(&zone, acting_user_id)),
                other => Err(unexpected_shape(AggregateKind::Zone, &other)),
            }
        })
        .await
    }
}
