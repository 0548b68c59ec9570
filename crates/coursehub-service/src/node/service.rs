//! Node reads and writes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::{NodeRepository, UeRepository};
use coursehub_entity::node::{CreateNode, Node, NodeTree, NodeWithChildIds};
use coursehub_entity::permission::{Operation, ServiceName};

use super::tree::{
    NodeMap, UeMap, build_node_with_child_id, build_tree_recursive, ensure_deletable,
    group_ues_by_parent,
};
use crate::context::RequestContext;

/// Request to create a node below an existing one.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateNodeRequest {
    /// Display name.
    pub name: String,
    /// Parent node. The new node joins the parent's academic year.
    pub parent_id: Uuid,
}

/// Request to rename and/or move a node.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateNodeRequest {
    /// New name.
    pub name: Option<String>,
    /// New parent, in the same academic year.
    pub parent_id: Option<Uuid>,
}

/// Manages the folder nodes of the teaching hierarchy.
#[derive(Debug, Clone)]
pub struct NodeService {
    node_repo: Arc<NodeRepository>,
    ue_repo: Arc<UeRepository>,
    checker: Arc<PermissionChecker>,
}

impl NodeService {
    /// Creates a new node service.
    pub fn new(
        node_repo: Arc<NodeRepository>,
        ue_repo: Arc<UeRepository>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            node_repo,
            ue_repo,
            checker,
        }
    }

    /// Load every node and UE of a year: one query each.
    pub async fn get_node_map(&self, academic_year: i32) -> AppResult<(NodeMap, UeMap)> {
        let nodes = self.node_repo.find_by_year(academic_year).await?;
        let ues = self.ue_repo.find_by_year(academic_year).await?;
        Ok((NodeMap::from_nodes(nodes), group_ues_by_parent(ues)))
    }

    /// The whole hierarchy of an academic year.
    pub async fn get_tree(&self, ctx: &RequestContext, academic_year: i32) -> AppResult<NodeTree> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::NodeService, Operation::Get)
            .await?;

        let (node_map, ue_map) = self.get_node_map(academic_year).await?;
        let root = node_map.root().ok_or_else(|| {
            AppError::not_found(format!("Academic year {academic_year} has no root node"))
        })?;
        Ok(build_tree_recursive(root, &node_map, &ue_map))
    }

    /// The subtree rooted at `node_id`.
    pub async fn get_subtree(&self, ctx: &RequestContext, node_id: Uuid) -> AppResult<NodeTree> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::NodeService, Operation::Get)
            .await?;

        let node = self.find(node_id).await?;
        let (node_map, ue_map) = self.get_node_map(node.academic_year).await?;
        Ok(build_tree_recursive(&node, &node_map, &ue_map))
    }

    /// A node with the ids of its immediate children.
    pub async fn get_node(
        &self,
        ctx: &RequestContext,
        node_id: Uuid,
    ) -> AppResult<NodeWithChildIds> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::NodeService, Operation::Get)
            .await?;

        let node = self.find(node_id).await?;
        let child_ids = self.node_repo.find_child_ids(node_id).await?;
        let ues = self.ue_repo.find_by_parent(node_id).await?;
        Ok(build_node_with_child_id(&node, child_ids, &ues))
    }

    /// Create a node below `req.parent_id`.
    pub async fn create_node(
        &self,
        ctx: &RequestContext,
        req: CreateNodeRequest,
    ) -> AppResult<Node> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::NodeService, Operation::Create)
            .await?;

        let parent = self.find(req.parent_id).await?;
        let node = self
            .node_repo
            .create(&CreateNode {
                name: req.name,
                parent_id: Some(parent.id),
                academic_year: parent.academic_year,
            })
            .await?;

        info!(node_id = %node.id, parent_id = %parent.id, account_id = %ctx.account_id, "Node created");
        Ok(node)
    }

    /// Rename and/or move a node.
    ///
    /// The root cannot be moved, and a node cannot move below itself or
    /// into another academic year.
    pub async fn update_node(
        &self,
        ctx: &RequestContext,
        node_id: Uuid,
        req: UpdateNodeRequest,
    ) -> AppResult<Node> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::NodeService, Operation::Update)
            .await?;

        let node = self.find(node_id).await?;

        if let Some(new_parent_id) = req.parent_id {
            if node.is_root() {
                return Err(AppError::validation("The root node cannot be moved"));
            }
            let (node_map, _) = self.get_node_map(node.academic_year).await?;
            let parent = node_map.get(&new_parent_id).ok_or_else(|| {
                AppError::validation(format!(
                    "Parent {new_parent_id} is not a node of academic year {}",
                    node.academic_year
                ))
            })?;
            if node_map.is_within(parent.id, node.id) {
                return Err(AppError::validation(
                    "A node cannot be moved below itself",
                ));
            }
        }

        let updated = self
            .node_repo
            .update(node_id, req.name.as_deref(), req.parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {node_id} not found")))?;

        info!(node_id = %node_id, account_id = %ctx.account_id, "Node updated");
        Ok(updated)
    }

    /// Delete a childless, non-root node.
    pub async fn delete_node(&self, ctx: &RequestContext, node_id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::NodeService, Operation::Delete)
            .await?;

        let node = self.find(node_id).await?;
        if node.is_root() {
            return Err(AppError::validation(
                "The root node of an academic year cannot be deleted",
            ));
        }

        let child_nodes = self.node_repo.find_child_ids(node_id).await?.len();
        let ues = self.ue_repo.find_by_parent(node_id).await?.len();
        ensure_deletable(&node, child_nodes, ues)?;

        if !self.node_repo.delete(node_id).await? {
            return Err(AppError::not_found(format!("Node {node_id} not found")));
        }

        info!(node_id = %node_id, account_id = %ctx.account_id, "Node deleted");
        Ok(())
    }

    async fn find(&self, node_id: Uuid) -> AppResult<Node> {
        self.node_repo
            .find_by_id(node_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {node_id} not found")))
    }
}
