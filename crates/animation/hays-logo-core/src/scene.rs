//! Minimal object graph of a loaded model.
//!
//! Hosts that already own a scene graph only need to implement [`ReferenceLookup`];
//! [`ModelGraph`] is the in-crate version used by the WASM adapter and tests.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::RestSource;
use crate::value::Vec3;

/// Local rest pose of a node as authored in the model file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestPose {
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
}

impl RestPose {
    #[inline]
    pub fn get(&self, source: RestSource) -> Vec3 {
        match source {
            RestSource::Position => self.position,
            RestSource::Rotation => self.rotation,
        }
    }
}

/// Looks up the rest-state value of a named node.
pub trait ReferenceLookup {
    fn rest_value(&self, name: &str, source: RestSource) -> Option<Vec3>;
}

/// One node of the model's object graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub rest: RestPose,
    /// Renderable meshes receive materials; groups only carry children.
    #[serde(default)]
    pub is_mesh: bool,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self {
            name: name.into(),
            rest: RestPose::default(),
            is_mesh: false,
            children,
        }
    }

    pub fn mesh(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            rest: RestPose {
                position,
                rotation: [0.0; 3],
            },
            is_mesh: true,
            children: Vec::new(),
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rest.rotation = rotation;
        self
    }

    /// Depth-first, pre-order visit of this node and its descendants.
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a SceneNode)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }
}

/// A loaded model: one root node plus a name index built on construction.
#[derive(Clone, Debug, Default)]
pub struct ModelGraph {
    root: SceneNode,
    // First node wins when names collide, matching a pre-order search.
    index: HashMap<String, RestPose>,
}

impl ModelGraph {
    pub fn new(root: SceneNode) -> Self {
        let mut index = HashMap::new();
        root.traverse(&mut |node| {
            index.entry(node.name.clone()).or_insert(node.rest);
        });
        Self { root, index }
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        let mut found = None;
        self.root.traverse(&mut |node| {
            if found.is_none() && node.name == name {
                found = Some(node);
            }
        });
        found
    }
}

impl ReferenceLookup for ModelGraph {
    fn rest_value(&self, name: &str, source: RestSource) -> Option<Vec3> {
        self.index.get(name).map(|rest| rest.get(source))
    }
}

impl ReferenceLookup for HashMap<String, RestPose> {
    fn rest_value(&self, name: &str, source: RestSource) -> Option<Vec3> {
        self.get(name).map(|rest| rest.get(source))
    }
}
