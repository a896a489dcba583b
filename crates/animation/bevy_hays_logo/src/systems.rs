use bevy::log::{debug, trace};
use bevy::math::EulerRot;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use hashbrown::HashMap;

use crate::components::{PlannedMaterial, SequenceRoot, SequenceTarget};
use crate::resources::{
    LogoMaterials, LogoSequencer, PendingOutputs, RestPoses, SequenceClock, TargetIndex,
};
use hays_logo_core::{Change, Channel, MaterialSpec, RestPose, TargetResolver};

/// Target name for an entity: the hint if present, else its `Name`.
fn target_name(name: &Name, hint: Option<&SequenceTarget>) -> String {
    hint.map(|h| h.name.clone())
        .unwrap_or_else(|| name.as_str().to_string())
}

fn rest_pose(tf: &Transform) -> RestPose {
    let (x, y, z) = tf.rotation.to_euler(EulerRot::XYZ);
    RestPose {
        position: tf.translation.to_array(),
        rotation: [x, y, z],
    }
}

/// Depth-first walk from every `SequenceRoot`, collecting named entities.
fn collect_named(
    roots: &Query<Entity, With<SequenceRoot>>,
    children: &Query<&Children>,
    names: &Query<(&Name, Option<&SequenceTarget>)>,
) -> Vec<(String, Entity)> {
    fn walk(
        e: Entity,
        out: &mut Vec<(String, Entity)>,
        names: &Query<(&Name, Option<&SequenceTarget>)>,
        children: &Query<&Children>,
    ) {
        if let Ok((name, hint)) = names.get(e) {
            out.push((target_name(name, hint), e));
        }
        if let Ok(cs) = children.get(e) {
            for &c in cs.iter() {
                walk(c, out, names, children);
            }
        }
    }

    let mut out = Vec::new();
    for root in roots.iter() {
        walk(root, &mut out, names, children);
    }
    out
}

pub fn advance_clock_system(time: Res<Time>, mut clock: ResMut<SequenceClock>) {
    if clock.running {
        clock.elapsed += time.delta_seconds();
    }
}

/// Binds still-unbound targets to entities found under `SequenceRoot`, drops
/// bindings whose entity is gone, and snapshots rest poses of newly seen entities.
pub fn bind_targets_system(
    roots: Query<Entity, With<SequenceRoot>>,
    children: Query<&Children>,
    names: Query<(&Name, Option<&SequenceTarget>)>,
    transforms: Query<&Transform>,
    mut index: ResMut<TargetIndex>,
    mut rest: ResMut<RestPoses>,
) {
    struct Resolver<'a> {
        found: &'a HashMap<String, Entity>,
    }
    impl TargetResolver for Resolver<'_> {
        type Handle = Entity;
        fn resolve(&mut self, name: &str) -> Option<Entity> {
            self.found.get(name).copied()
        }
    }

    // Despawned entities (e.g. scene reloaded) are unbound so they can rebind.
    let stale: Vec<String> = index
        .0
        .iter_bound()
        .filter(|&(_, &e)| names.get(e).is_err())
        .map(|(n, _)| n.to_string())
        .collect();
    for name in stale {
        debug!("target '{}' lost its entity; unbinding", name);
        index.0.unbind(&name);
        rest.0.remove(&name);
    }

    let mut found: HashMap<String, Entity> = HashMap::new();
    for (name, entity) in collect_named(&roots, &children, &names) {
        if !rest.0.contains_key(&name) {
            if let Ok(tf) = transforms.get(entity) {
                rest.0.insert(name.clone(), rest_pose(tf));
            }
        }
        // First match in traversal order wins.
        found.entry(name).or_insert(entity);
    }

    if index.0.is_complete() {
        return;
    }
    let bound = index.0.bind_with(&mut Resolver { found: &found });
    if bound > 0 {
        debug!("bound {} sequence target(s)", bound);
    }
}

/// Resolves derived endpoints once their reference entities have been seen.
pub fn resolve_references_system(mut seq: ResMut<LogoSequencer>, rest: Res<RestPoses>) {
    if seq.0.is_fully_resolved() || !rest.is_changed() {
        return;
    }
    let n = seq.0.resolve_derived(&rest.0);
    if n > 0 {
        debug!("resolved {} derived endpoint(s)", n);
    }
}

fn to_standard(spec: &MaterialSpec) -> StandardMaterial {
    let [r, g, b] = spec.base_color;
    let [er, eg, eb] = spec.emissive_scaled();
    StandardMaterial {
        base_color: Color::linear_rgb(r, g, b),
        metallic: spec.metallic,
        perceptual_roughness: spec.roughness,
        emissive: LinearRgba::rgb(er, eg, eb),
        ..default()
    }
}

/// Gives every mesh under `SequenceRoot` its own material built from the plan.
/// Meshes the plan keeps are only marked. Runs until each mesh has been handled once.
pub fn assign_materials_system(
    mut commands: Commands,
    plan: Res<LogoMaterials>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    roots: Query<Entity, With<SequenceRoot>>,
    children: Query<&Children>,
    names: Query<(&Name, Option<&SequenceTarget>)>,
    meshes: Query<(), (With<Handle<StandardMaterial>>, Without<PlannedMaterial>)>,
) {
    let (Some(plan), Some(mut materials)) = (plan.0.as_ref(), materials) else {
        return;
    };
    for (name, entity) in collect_named(&roots, &children, &names) {
        if meshes.get(entity).is_err() {
            continue;
        }
        let mut mesh = commands.entity(entity);
        mesh.insert(PlannedMaterial);
        let Some(spec) = plan.for_mesh(&name) else {
            trace!("'{}' keeps its own material", name);
            continue;
        };
        mesh.insert(materials.add(to_standard(spec)));
        if !spec.casts_shadows {
            mesh.insert(NotShadowCaster);
        }
        trace!("material assigned to '{}'", name);
    }
}

/// Evaluate the sequencer at the clock's time and stash changes into `PendingOutputs`.
pub fn compute_outputs_system(
    mut seq: ResMut<LogoSequencer>,
    clock: Res<SequenceClock>,
    mut pending: ResMut<PendingOutputs>,
) {
    let out = seq.0.evaluate(clock.elapsed);
    pending.changes.clear();
    pending.changes.extend(out.changes.iter().cloned());
}

/// Write staged changes into transforms and materials. Targets without an entity
/// yet are skipped this frame.
pub fn apply_outputs_system(
    mut pending: ResMut<PendingOutputs>,
    index: Res<TargetIndex>,
    plan: Res<LogoMaterials>,
    mut transforms: Query<&mut Transform>,
    handles: Query<&Handle<StandardMaterial>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    for Change {
        target,
        channel,
        value,
    } in pending.changes.drain(..)
    {
        let Some(&entity) = index.0.get(&target) else {
            trace!("target '{}' not bound; skipping", target);
            continue;
        };
        let [x, y, z] = value;
        if channel.is_pose() {
            let Ok(mut tf) = transforms.get_mut(entity) else {
                continue;
            };
            if channel == Channel::Position {
                tf.translation = Vec3::new(x, y, z);
            } else {
                tf.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
            }
            continue;
        }
        let (Some(materials), Ok(handle)) = (materials.as_deref_mut(), handles.get(entity)) else {
            continue;
        };
        let Some(mat) = materials.get_mut(handle) else {
            continue;
        };
        if channel == Channel::BaseColor {
            mat.base_color = Color::linear_rgb(x, y, z);
        } else {
            let k = plan
                .0
                .as_ref()
                .and_then(|p| p.for_mesh(&target))
                .map(|m| m.emissive_intensity)
                .filter(|k| *k > 0.0)
                .unwrap_or(1.0);
            mat.emissive = LinearRgba::rgb(x * k, y * k, z * k);
        }
    }
}
