//! A parent's view: pick a child, or go straight to the only one

use crate::error::Result;
use crate::report::student::StudentReport;
use crate::source::ResultSource;
use crate::types::{ParentId, RoundSelector, Student};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Children linked to one parent account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildList {
    pub parent_id: ParentId,
    pub children: Vec<Student>,
}

impl ChildList {
    pub async fn build(source: &dyn ResultSource, parent_id: &str) -> Result<Self> {
        let children = source.children(parent_id).await?;
        Ok(Self {
            parent_id: parent_id.to_string(),
            children,
        })
    }
}

/// What a parent sees first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ParentView {
    /// Zero or several children; the parent has to choose
    Children(ChildList),
    /// Exactly one child, whose report is shown directly
    Report(Box<StudentReport>),
}

impl ParentView {
    pub async fn build(
        source: &dyn ResultSource,
        parent_id: &str,
        selector: RoundSelector,
        history_limit: usize,
    ) -> Result<Self> {
        let list = ChildList::build(source, parent_id).await?;

        match list.children.as_slice() {
            [only] => {
                info!(
                    "Parent {} has one child, showing {}",
                    parent_id, only.competitor_id
                );
                let report =
                    StudentReport::build(source, &only.competitor_id, selector, history_limit)
                        .await?;
                Ok(ParentView::Report(Box::new(report)))
            }
            _ => {
                info!("Parent {}: {} children", parent_id, list.children.len());
                Ok(ParentView::Children(list))
            }
        }
    }
}
