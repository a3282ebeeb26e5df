//! Boundary to the external render layer.
//!
//! The simulation owns light-weight handles to scene nodes and GPU resources;
//! the renderer owns the real objects. Ownership is one-directional: a remote
//! entry owns its [`AvatarVisual`], and the visual never points back.

use nalgebra as na;
use shared::Quat;

use crate::player::Animation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Handles for a nametag sprite floating above an avatar.
#[derive(Clone, Copy, Debug)]
pub struct NametagVisual {
    pub node: NodeHandle,
    pub geometry: Option<GeometryHandle>,
    pub material: Option<MaterialHandle>,
}

/// Owned visual representation of one character: the skinned model node and,
/// for remote players, a nametag.
#[derive(Clone, Copy, Debug)]
pub struct AvatarVisual {
    pub node: NodeHandle,
    pub geometry: Option<GeometryHandle>,
    pub material: Option<MaterialHandle>,
    pub nametag: Option<NametagVisual>,
}

impl AvatarVisual {
    /// Release every GPU-side sub-resource this visual owns, then remove its
    /// nodes from the scene. Absent sub-resources are skipped, not an error,
    /// so release is safe on partially constructed visuals.
    pub fn release(self, backend: &mut dyn SceneBackend) {
        if let Some(tag) = self.nametag {
            if let Some(material) = tag.material {
                backend.dispose_material(material);
            }
            if let Some(geometry) = tag.geometry {
                backend.dispose_geometry(geometry);
            }
            backend.remove_node(tag.node);
        }

        if let Some(material) = self.material {
            backend.dispose_material(material);
        }
        if let Some(geometry) = self.geometry {
            backend.dispose_geometry(geometry);
        }
        backend.remove_node(self.node);
    }
}

/// Operations the render layer provides to the simulation.
pub trait SceneBackend {
    /// Instantiate an avatar model for `skin`, with a nametag when `name` is
    /// given (remote players only).
    fn spawn_avatar(&mut self, skin: &str, name: Option<&str>) -> AvatarVisual;

    /// Write a node's world transform.
    fn set_node_pose(&mut self, node: NodeHandle, position: na::Point3<f32>, rotation: Quat);

    /// Write a node's world position, keeping its rotation.
    fn set_node_position(&mut self, node: NodeHandle, position: na::Point3<f32>);

    /// Switch the animation clip playing on a node.
    fn play_animation(&mut self, node: NodeHandle, animation: Animation);

    /// Advance the node's animation mixer.
    fn advance_animation(&mut self, node: NodeHandle, dt: f32);

    fn dispose_geometry(&mut self, geometry: GeometryHandle);
    fn dispose_material(&mut self, material: MaterialHandle);
    fn remove_node(&mut self, node: NodeHandle);
}
