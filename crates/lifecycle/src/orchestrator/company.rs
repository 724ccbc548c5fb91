//! Company-level cascade.
//!
//! The widest cascade: every branch, zone, checker and fact under the company
//! is removed, every reachable user except the acting one is deactivated.
//! It is also the only scope that removes the deactivated users' operating
//! records and their groups; branch and zone cascades leave them alone.

use std::sync::Arc;

use async_trait::async_trait;
use error::Result;

use super::{execute, unexpected_shape, CascadeOrchestrator};
use crate::{
    graph::{CompanyNode, SubtreeGraph},
    kinds::AggregateKind,
    plan::{CascadePlan, CascadeReport, PlanBuilder},
    store::LifecycleStore,
};

pub struct CompanyCascade {
    store: Arc<dyn LifecycleStore>,
}

impl CompanyCascade {
    pub fn new(store: Arc<dyn LifecycleStore>) -> Self {
        Self {
            store,
        }
    }

    /// Plan for a materialized company.
    pub fn plan(company: &CompanyNode, acting_user_id: Option<i32>) -> CascadePlan {
        let mut builder = PlanBuilder::new(acting_user_id);
        builder
            .add_company(company)
            .add_operatings(&company.operatings);
        builder.build(AggregateKind::Company, company.id)
    }
}

#[async_trait]
impl CascadeOrchestrator for CompanyCascade {
    fn aggregate(&self) -> AggregateKind { AggregateKind::Company }

    async fn run(&self, root_id: i32, acting_user_id: Option<i32>) -> Result<Option<CascadeReport>> {
        execute(&self.store, AggregateKind::Company, root_id, acting_user_id, move |graph| {
            match graph {
                SubtreeGraph::Company(company) => Ok(CompanyCascade::plan(&company, acting_user_id)),
                other => Err(unexpected_shape(AggregateKind::Company, &other)),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{BranchNode, CheckerNode, InventoryNode, OperatingNode, ZoneNode},
        kinds::EntityKind,
        plan::StepAction,
    };

    /// Company 1 -> Branch 10 (user 100) -> Zone 20 (user 101) with one item,
    /// one inventory (detail 40, verification 50) and checker 60 (user 102)
    /// that also reaches verification 50.
    fn company() -> CompanyNode {
        CompanyNode {
            id:         1,
            active:     true,
            user_id:    Some(99),
            branches:   vec![BranchNode {
                id:       10,
                active:   true,
                user_id:  Some(100),
                zones:    vec![ZoneNode {
                    id:          20,
                    active:      true,
                    user_id:     Some(101),
                    item_ids:    vec![30],
                    inventories: vec![InventoryNode {
                        id:               31,
                        detail_ids:       vec![40],
                        verification_ids: vec![50],
                    }],
                }],
                checkers: vec![CheckerNode {
                    id:               60,
                    user_id:          Some(102),
                    verification_ids: vec![50],
                }],
            }],
            operatings: vec![
                OperatingNode {
                    id:        70,
                    user_id:   100,
                    group_ids: vec![80, 81],
                },
                OperatingNode {
                    id:        71,
                    user_id:   101,
                    group_ids: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_company_plan_is_leaf_first() {
        let plan = CompanyCascade::plan(&company(), Some(500));
        let order: Vec<_> = plan.steps.iter().map(|s| (s.action, s.kind)).collect();
        assert_eq!(order, vec![
            (StepAction::Remove, EntityKind::InventoryDetail),
            (StepAction::Remove, EntityKind::Verification),
            (StepAction::Remove, EntityKind::Item),
            (StepAction::Remove, EntityKind::Inventory),
            (StepAction::Remove, EntityKind::Checker),
            (StepAction::Deactivate, EntityKind::User),
            (StepAction::Remove, EntityKind::OperatingGroup),
            (StepAction::Remove, EntityKind::Operating),
            (StepAction::Remove, EntityKind::Zone),
            (StepAction::Remove, EntityKind::Branch),
            (StepAction::Remove, EntityKind::Company),
        ]);
        assert_eq!(plan.ids_for(StepAction::Remove, EntityKind::Verification), &[50]);
        assert_eq!(plan.ids_for(StepAction::Deactivate, EntityKind::User), &[99, 100, 101, 102]);
        assert_eq!(plan.ids_for(StepAction::Remove, EntityKind::Company), &[1]);
    }

    #[test]
    fn test_acting_branch_manager_keeps_operating_records() {
        let plan = CompanyCascade::plan(&company(), Some(100));
        assert_eq!(plan.ids_for(StepAction::Deactivate, EntityKind::User), &[99, 101, 102]);
        assert_eq!(plan.ids_for(StepAction::Remove, EntityKind::Operating), &[71]);
        assert!(plan
            .ids_for(StepAction::Remove, EntityKind::OperatingGroup)
            .is_empty());
    }
}
