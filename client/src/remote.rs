//! Registry of remote players and their network-to-visual reconciliation.
//!
//! Each entry buffers the latest authoritative snapshot as its interpolation
//! target; the displayed pose converges toward it every frame at a fixed
//! rate. The previously-displayed pose is the implicit interpolation origin,
//! so a fresh snapshot never causes a visual jump.

use std::collections::HashMap;

use log::debug;
use nalgebra as na;
use shared::constants::{NAME_MAX_CHARS, NAMETAG_HEIGHT, REMOTE_LERP_RATE};
use shared::{PlayerRecord, Quat};

use crate::player::Animation;
use crate::scene::{AvatarVisual, SceneBackend};

/// One remote player: identity, owned visual, displayed pose, and the latest
/// snapshot targets.
#[derive(Debug)]
pub struct RemoteCharacterEntry {
    pub name: String,
    visual: AvatarVisual,
    pub position: na::Point3<f32>,
    pub rotation: Quat,
    pub target_position: na::Point3<f32>,
    pub target_rotation: Quat,
    pub animation: Animation,
}

impl RemoteCharacterEntry {
    #[inline]
    pub fn visual(&self) -> &AvatarVisual {
        &self.visual
    }
}

/// Keyed registry of remote players.
///
/// The network event path mutates it through [`apply_snapshot`] and
/// [`remove`]; the frame tick reads and smooths it through [`advance`]. The
/// two interleave but never run in parallel.
///
/// [`apply_snapshot`]: RemoteCharacterStore::apply_snapshot
/// [`remove`]: RemoteCharacterStore::remove
/// [`advance`]: RemoteCharacterStore::advance
#[derive(Debug, Default)]
pub struct RemoteCharacterStore {
    entries: HashMap<String, RemoteCharacterEntry>,
}

impl RemoteCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert from an authoritative snapshot record.
    ///
    /// An unseen id is created only when both display name and avatar skin
    /// are populated; otherwise the record is dropped silently and creation
    /// is deferred to a later, complete snapshot. For existing entries only
    /// the targets are replaced; the displayed pose keeps converging from
    /// wherever it currently is.
    pub fn apply_snapshot(&mut self, backend: &mut dyn SceneBackend, record: &PlayerRecord) {
        let animation = Animation::from_label(&record.animation);

        if let Some(entry) = self.entries.get_mut(&record.id) {
            entry.target_position = record.position();
            entry.target_rotation = record.quaternion();
            if entry.animation != animation {
                entry.animation = animation;
                // Label changes cut over immediately; only pose is smoothed.
                backend.play_animation(entry.visual.node, animation);
            }
            return;
        }

        if record.name.is_empty() || record.avatar_skin.is_empty() {
            debug!(
                "deferring creation of remote player {:?}: incomplete snapshot",
                record.id
            );
            return;
        }

        let name: String = record.name.chars().take(NAME_MAX_CHARS).collect();
        let visual = backend.spawn_avatar(&record.avatar_skin, Some(&name));
        backend.play_animation(visual.node, animation);

        self.entries.insert(
            record.id.clone(),
            RemoteCharacterEntry {
                name,
                visual,
                position: record.position(),
                rotation: record.quaternion(),
                target_position: record.position(),
                target_rotation: record.quaternion(),
                animation,
            },
        );
    }

    /// Recompute every entry's displayed pose, converging toward the latest
    /// target at `min(1, dt * 10)` per tick. With no new snapshot the pose
    /// settles at the last target and holds; there is no extrapolation.
    pub fn advance(&mut self, dt: f32, backend: &mut dyn SceneBackend) {
        let factor = (dt * REMOTE_LERP_RATE).min(1.0);

        for entry in self.entries.values_mut() {
            entry.position = na::Point3::new(
                lerp(entry.position.x, entry.target_position.x, factor),
                lerp(entry.position.y, entry.target_position.y, factor),
                lerp(entry.position.z, entry.target_position.z, factor),
            );
            entry.rotation = entry
                .rotation
                .try_slerp(&entry.target_rotation, factor, 1.0e-6)
                .unwrap_or(entry.target_rotation);

            backend.set_node_pose(entry.visual.node, entry.position, entry.rotation);
            backend.advance_animation(entry.visual.node, dt);

            if let Some(tag) = entry.visual.nametag {
                let mut tag_position = entry.position;
                tag_position.y += NAMETAG_HEIGHT;
                backend.set_node_position(tag.node, tag_position);
            }
        }
    }

    /// Remove a player and release its visual resources. Idempotent:
    /// removing an absent id is a no-op.
    pub fn remove(&mut self, backend: &mut dyn SceneBackend, id: &str) {
        match self.entries.remove(id) {
            Some(entry) => entry.visual.release(backend),
            None => debug!("remove for unknown remote player {id:?}, ignoring"),
        }
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&RemoteCharacterEntry> {
        self.entries.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{GeometryHandle, MaterialHandle, NametagVisual, NodeHandle};

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct RecordingBackend {
        next_id: u64,
        spawned_skins: Vec<String>,
        disposed_geometries: Vec<GeometryHandle>,
        disposed_materials: Vec<MaterialHandle>,
        removed_nodes: Vec<NodeHandle>,
        played: Vec<(NodeHandle, Animation)>,
        positions: HashMap<NodeHandle, na::Point3<f32>>,
    }

    impl RecordingBackend {
        fn alloc(&mut self) -> u64 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl SceneBackend for RecordingBackend {
        fn spawn_avatar(&mut self, skin: &str, name: Option<&str>) -> AvatarVisual {
            self.spawned_skins.push(skin.to_owned());
            let nametag = name.map(|_| NametagVisual {
                node: NodeHandle(self.alloc()),
                geometry: Some(GeometryHandle(self.alloc())),
                material: Some(MaterialHandle(self.alloc())),
            });
            AvatarVisual {
                node: NodeHandle(self.alloc()),
                geometry: Some(GeometryHandle(self.alloc())),
                material: Some(MaterialHandle(self.alloc())),
                nametag,
            }
        }

        fn set_node_pose(&mut self, node: NodeHandle, position: na::Point3<f32>, _rotation: Quat) {
            self.positions.insert(node, position);
        }

        fn set_node_position(&mut self, node: NodeHandle, position: na::Point3<f32>) {
            self.positions.insert(node, position);
        }

        fn play_animation(&mut self, node: NodeHandle, animation: Animation) {
            self.played.push((node, animation));
        }

        fn advance_animation(&mut self, _node: NodeHandle, _dt: f32) {}

        fn dispose_geometry(&mut self, geometry: GeometryHandle) {
            self.disposed_geometries.push(geometry);
        }

        fn dispose_material(&mut self, material: MaterialHandle) {
            self.disposed_materials.push(material);
        }

        fn remove_node(&mut self, node: NodeHandle) {
            self.removed_nodes.push(node);
        }
    }

    fn record(id: &str, name: &str, skin: &str, x: f32, animation: &str) -> PlayerRecord {
        PlayerRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            avatar_skin: skin.to_owned(),
            position_x: x,
            position_y: 0.0,
            position_z: 0.0,
            quaternion_x: 0.0,
            quaternion_y: 0.0,
            quaternion_z: 0.0,
            quaternion_w: 1.0,
            animation: animation.to_owned(),
        }
    }

    #[test]
    fn incomplete_first_snapshot_is_dropped_silently() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "", "female", 0.0, "idle"));
        store.apply_snapshot(&mut backend, &record("p1", "Ana", "", 0.0, "idle"));
        assert!(store.is_empty());
        assert!(backend.spawned_skins.is_empty());

        // A later complete snapshot creates the entry.
        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "idle"));
        assert!(store.contains("p1"));
        assert_eq!(backend.spawned_skins, vec!["female".to_owned()]);
    }

    #[test]
    fn display_name_is_truncated() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();
        let long = "x".repeat(40);

        store.apply_snapshot(&mut backend, &record("p1", &long, "male", 0.0, "idle"));
        assert_eq!(store.get("p1").unwrap().name.chars().count(), 25);
    }

    #[test]
    fn displayed_position_converges_monotonically_without_overshoot() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "idle"));
        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 10.0, "idle"));

        let mut previous = store.get("p1").unwrap().position.x;
        for _ in 0..300 {
            store.advance(DT, &mut backend);
            let x = store.get("p1").unwrap().position.x;
            // Strictly toward the target until float resolution runs out.
            assert!(x >= previous);
            if 10.0 - previous > 1.0e-4 {
                assert!(x > previous);
            }
            assert!(x < 10.0);
            previous = x;
        }
        assert!(previous > 9.9);

        // Holding with no new snapshot: the pose settles, never extrapolates.
        for _ in 0..50 {
            store.advance(DT, &mut backend);
            assert!(store.get("p1").unwrap().position.x < 10.0);
        }
    }

    #[test]
    fn snapshot_update_keeps_the_displayed_pose_as_origin() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "idle"));
        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 10.0, "idle"));
        for _ in 0..5 {
            store.advance(DT, &mut backend);
        }
        let mid = store.get("p1").unwrap().position.x;
        assert!(mid > 0.0 && mid < 10.0);

        // A new target does not touch the displayed pose.
        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", -4.0, "idle"));
        let entry = store.get("p1").unwrap();
        assert_eq!(entry.position.x, mid);
        assert_eq!(entry.target_position.x, -4.0);
    }

    #[test]
    fn animation_changes_cut_over_immediately() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "idle"));
        assert_eq!(backend.played.last().unwrap().1, Animation::Idle);

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "dancing"));
        assert_eq!(backend.played.last().unwrap().1, Animation::Dancing);
        assert_eq!(store.get("p1").unwrap().animation, Animation::Dancing);

        // Re-sending the same label does not restart the clip.
        let plays = backend.played.len();
        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "dancing"));
        assert_eq!(backend.played.len(), plays);
    }

    #[test]
    fn nametag_floats_a_fixed_height_above_the_avatar() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 3.0, "idle"));
        store.advance(DT, &mut backend);

        let entry = store.get("p1").unwrap();
        let tag = entry.visual().nametag.unwrap();
        let tag_position = backend.positions[&tag.node];
        assert!((tag_position.y - entry.position.y - NAMETAG_HEIGHT).abs() < 1.0e-6);
        assert_eq!(tag_position.x, entry.position.x);
    }

    #[test]
    fn removal_is_idempotent_and_releases_every_subresource() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "idle"));
        let visual = *store.get("p1").unwrap().visual();

        store.remove(&mut backend, "p1");
        assert!(store.is_empty());
        // Model + nametag: two geometries, two materials, two nodes.
        assert_eq!(backend.disposed_geometries.len(), 2);
        assert_eq!(backend.disposed_materials.len(), 2);
        assert_eq!(backend.removed_nodes.len(), 2);
        assert!(backend.removed_nodes.contains(&visual.node));

        // Second removal (and removal of a never-seen id) are no-ops.
        store.remove(&mut backend, "p1");
        store.remove(&mut backend, "ghost");
        assert_eq!(backend.disposed_geometries.len(), 2);
        assert_eq!(backend.removed_nodes.len(), 2);
    }

    #[test]
    fn release_skips_absent_subresources() {
        let mut store = RemoteCharacterStore::new();
        let mut backend = RecordingBackend::default();

        store.apply_snapshot(&mut backend, &record("p1", "Ana", "female", 0.0, "idle"));
        // Simulate a partially constructed visual by stripping handles.
        let entry = store.entries.get_mut("p1").unwrap();
        entry.visual.geometry = None;
        entry.visual.nametag = None;

        store.remove(&mut backend, "p1");
        assert_eq!(backend.disposed_geometries.len(), 0);
        assert_eq!(backend.disposed_materials.len(), 1);
        assert_eq!(backend.removed_nodes.len(), 1);
    }
}
