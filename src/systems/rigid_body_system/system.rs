use log::{debug, warn};

use crate::core::{Arena, Handle};
use crate::domain::errors::{BodyError, RegistryError, ShapeError};
use crate::domain::material::Material;
use crate::rigid_body::{BodyDesc, RigidBody, SimulationType};
use crate::trigger::{Trigger, TriggerDesc};

pub type BodyHandle = Handle<RigidBody>;
pub type TriggerHandle = Handle<Trigger>;

/// Owns every body and trigger and the per-type buckets the step walks.
///
/// Buckets hold handles in insertion order. Destroyed or killed entries stay
/// in their bucket (and are skipped) until `purge_deleted_objects`.
pub struct RigidBodySystem {
    pub(super) bodies: Arena<RigidBody>,
    pub(super) buckets: [Vec<BodyHandle>; 3],
    pub(super) triggers: Arena<Trigger>,
    pub(super) trigger_buckets: [Vec<TriggerHandle>; 3],
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
            buckets: Default::default(),
            triggers: Arena::new(),
            trigger_buckets: Default::default(),
        }
    }

    /// Validate and store a body. It does not take part in the step until
    /// `add_to_bucket` is called.
    pub fn create_rigidbody(
        &mut self,
        desc: BodyDesc,
        default_material: Material,
    ) -> Result<BodyHandle, BodyError> {
        let body = RigidBody::from_desc(desc, default_material)?;
        Ok(self.bodies.insert(body))
    }

    pub fn add_to_bucket(&mut self, handle: BodyHandle) -> Result<(), RegistryError> {
        let body = self
            .bodies
            .get(handle)
            .ok_or(RegistryError::StaleHandle(handle.to_bits()))?;
        let bucket = &mut self.buckets[body.simulation_type().bucket_index()];
        if bucket.contains(&handle) {
            return Err(RegistryError::AlreadyBucketed(handle.to_bits()));
        }
        bucket.push(handle);
        Ok(())
    }

    /// `create_rigidbody` followed by `add_to_bucket`.
    pub fn spawn(
        &mut self,
        desc: BodyDesc,
        default_material: Material,
    ) -> Result<BodyHandle, BodyError> {
        let handle = self.create_rigidbody(desc, default_material)?;
        let fresh = self.add_to_bucket(handle);
        debug_assert!(fresh.is_ok());
        Ok(handle)
    }

    /// Free the body now. Its handle goes stale immediately; the bucket slot
    /// is swept by the next purge.
    pub fn destroy_rigidbody(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let removed = self.bodies.remove(handle);
        if removed.is_none() {
            warn!("destroy_rigidbody: stale handle {handle:?}");
        }
        removed
    }

    /// Mark a body for removal at the next purge. It is skipped by every pass
    /// from now on.
    pub fn kill(&mut self, handle: BodyHandle) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.set_alive(false);
                true
            }
            None => false,
        }
    }

    pub fn create_trigger(&mut self, desc: TriggerDesc) -> Result<TriggerHandle, ShapeError> {
        let trigger = Trigger::from_desc(desc)?;
        Ok(self.triggers.insert(trigger))
    }

    pub fn add_trigger_to_bucket(&mut self, handle: TriggerHandle) -> Result<(), RegistryError> {
        let trigger = self
            .triggers
            .get(handle)
            .ok_or(RegistryError::StaleHandle(handle.to_bits()))?;
        let bucket = &mut self.trigger_buckets[trigger.simulation_type().bucket_index()];
        if bucket.contains(&handle) {
            return Err(RegistryError::AlreadyBucketed(handle.to_bits()));
        }
        bucket.push(handle);
        Ok(())
    }

    pub fn spawn_trigger(&mut self, desc: TriggerDesc) -> Result<TriggerHandle, ShapeError> {
        let handle = self.create_trigger(desc)?;
        let fresh = self.add_trigger_to_bucket(handle);
        debug_assert!(fresh.is_ok());
        Ok(handle)
    }

    pub fn destroy_trigger(&mut self, handle: TriggerHandle) -> Option<Trigger> {
        let removed = self.triggers.remove(handle);
        if removed.is_none() {
            warn!("destroy_trigger: stale handle {handle:?}");
        }
        removed
    }

    pub fn kill_trigger(&mut self, handle: TriggerHandle) -> bool {
        match self.triggers.get_mut(handle) {
            Some(trigger) => {
                trigger.set_alive(false);
                true
            }
            None => false,
        }
    }

    /// Undo `spawn` for exactly these handles: free them and drop their bucket
    /// entries. Other killed or stale entries wait for the next purge.
    pub fn retract(&mut self, bodies: &[BodyHandle], triggers: &[TriggerHandle]) {
        for bucket in self.buckets.iter_mut() {
            bucket.retain(|h| !bodies.contains(h));
        }
        for &h in bodies {
            self.bodies.remove(h);
        }
        for bucket in self.trigger_buckets.iter_mut() {
            bucket.retain(|h| !triggers.contains(h));
        }
        for &h in triggers {
            self.triggers.remove(h);
        }
    }

    /// Drop stale and killed entries from every bucket, keeping the order of
    /// the survivors. Killed values are freed. Returns how many bucket
    /// entries went away.
    pub fn purge_deleted_objects(&mut self) -> usize {
        let mut purged = 0;

        let Self { bodies, buckets, triggers, trigger_buckets } = self;
        let mut dead_bodies = Vec::new();
        for bucket in buckets.iter_mut() {
            let before = bucket.len();
            bucket.retain(|&h| match bodies.get(h) {
                None => false,
                Some(body) if !body.is_alive() => {
                    dead_bodies.push(h);
                    false
                }
                Some(_) => true,
            });
            purged += before - bucket.len();
        }
        for h in dead_bodies {
            bodies.remove(h);
        }

        let mut dead_triggers = Vec::new();
        for bucket in trigger_buckets.iter_mut() {
            let before = bucket.len();
            bucket.retain(|&h| match triggers.get(h) {
                None => false,
                Some(trigger) if !trigger.is_alive() => {
                    dead_triggers.push(h);
                    false
                }
                Some(_) => true,
            });
            purged += before - bucket.len();
        }
        for h in dead_triggers {
            triggers.remove(h);
        }

        if purged > 0 {
            debug!("purged {purged} deleted objects");
        }
        purged
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn trigger(&self, handle: TriggerHandle) -> Option<&Trigger> {
        self.triggers.get(handle)
    }

    pub fn trigger_mut(&mut self, handle: TriggerHandle) -> Option<&mut Trigger> {
        self.triggers.get_mut(handle)
    }

    /// Handles in step order, possibly including stale or killed entries.
    pub fn bucket(&self, ty: SimulationType) -> &[BodyHandle] {
        &self.buckets[ty.bucket_index()]
    }

    pub fn trigger_bucket(&self, ty: SimulationType) -> &[TriggerHandle] {
        &self.trigger_buckets[ty.bucket_index()]
    }

    /// Live, not-killed bodies of one bucket, in step order.
    pub fn live_bodies(&self, ty: SimulationType) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        live_in(&self.bodies, &self.buckets[ty.bucket_index()])
    }

    pub fn live_triggers(&self) -> impl Iterator<Item = (TriggerHandle, &Trigger)> {
        self.trigger_buckets.iter().flat_map(move |bucket| {
            bucket.iter().filter_map(move |&h| {
                self.triggers.get(h).filter(|t| t.is_alive()).map(|t| (h, t))
            })
        })
    }

    /// Bodies currently stored, bucketed or not.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.triggers.clear();
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        for bucket in self.trigger_buckets.iter_mut() {
            bucket.clear();
        }
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn live_in<'a>(
    bodies: &'a Arena<RigidBody>,
    bucket: &'a [BodyHandle],
) -> impl Iterator<Item = (BodyHandle, &'a RigidBody)> + 'a {
    bucket
        .iter()
        .filter_map(move |&h| bodies.get(h).filter(|b| b.is_alive()).map(|b| (h, b)))
}
