//! Ownership of every overlay window, its radius, and its enforcer.
//!
//! The set is the only owner of the [`OverlayRegistry`], so the registry's
//! lifetime is the lifetime of the overlays and tests can build as many
//! independent sets as they like.

use std::time::Instant;

use crate::enforcer::TopmostEnforcer;
use crate::event::ForegroundChange;
use crate::geometry::CornerMasks;
use crate::rect::Rect;
use crate::registry::OverlayRegistry;
use crate::window::Overlay;

/// One overlay window and the state bound to it.
struct ManagedOverlay<W> {
    window: W,
    bounds: Rect,
    radius: f64,
    visible: bool,
    enforcer: TopmostEnforcer,
}

impl<W: Overlay> ManagedOverlay<W> {
    /// Hides the window for `radius <= 0`, otherwise repaints the masks
    /// for exactly this radius and shows it.
    fn apply_radius(&mut self, radius: f64) {
        self.radius = radius;
        if radius > 0.0 {
            let masks = CornerMasks::generate(radius);
            if let Err(e) = self.window.apply_masks(&masks) {
                crate::log_warn!("Failed to paint masks on 0x{:X}: {e}", self.window.id());
            }
            self.window.show();
            self.visible = true;
        } else {
            self.window.hide();
            self.visible = false;
        }
    }
}

/// All overlay windows of the process.
pub struct OverlaySet<W: Overlay> {
    overlays: Vec<ManagedOverlay<W>>,
    registry: OverlayRegistry,
}

impl<W: Overlay> OverlaySet<W> {
    pub fn new(registry: OverlayRegistry) -> Self {
        Self {
            overlays: Vec::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    /// Takes ownership of a freshly created window covering `bounds`.
    ///
    /// Registers its identity, applies the radius, forces it to the top
    /// once, and subscribes an idle enforcer to foreground changes.
    pub fn insert(&mut self, window: W, bounds: Rect, radius: f64) -> usize {
        let id = window.id();
        self.registry.register(id);

        let mut managed = ManagedOverlay {
            window,
            bounds,
            radius,
            visible: false,
            enforcer: TopmostEnforcer::new(),
        };
        managed.apply_radius(radius);
        if let Err(e) = managed.window.force_topmost() {
            crate::log_debug!("Initial force_topmost 0x{id:X} failed: {e}");
        }

        crate::log_info!("Overlay 0x{id:X} created for {bounds} (radius {radius})");
        self.overlays.push(managed);
        id
    }

    /// Updates one overlay's radius. Returns `false` if `id` is unknown.
    pub fn set_radius(&mut self, id: usize, radius: f64) -> bool {
        match self.find_mut(id) {
            Some(managed) => {
                managed.apply_radius(radius);
                true
            }
            None => false,
        }
    }

    /// Updates every overlay's radius.
    pub fn set_radius_all(&mut self, radius: f64) {
        for managed in &mut self.overlays {
            managed.apply_radius(radius);
        }
    }

    pub fn radius(&self, id: usize) -> Option<f64> {
        self.find(id).map(|m| m.radius)
    }

    pub fn bounds(&self, id: usize) -> Option<Rect> {
        self.find(id).map(|m| m.bounds)
    }

    pub fn is_visible(&self, id: usize) -> Option<bool> {
        self.find(id).map(|m| m.visible)
    }

    pub fn is_reinforcing(&self, id: usize) -> Option<bool> {
        self.find(id).map(|m| m.enforcer.is_reinforcing())
    }

    /// Delivers a foreground change to every subscribed enforcer.
    ///
    /// Returns how many overlays started (or restarted) reinforcement.
    pub fn dispatch(&mut self, change: &ForegroundChange, now: Instant) -> usize {
        let registry = &self.registry;
        let mut started = 0;
        for managed in &mut self.overlays {
            if managed
                .enforcer
                .on_foreground(change, registry, &managed.window, now)
            {
                started += 1;
            }
        }
        started
    }

    /// Runs every tick that is due. Returns the number of ticks run.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut ticks = 0;
        for managed in &mut self.overlays {
            if managed.enforcer.poll(&managed.window, now) {
                ticks += 1;
            }
        }
        ticks
    }

    /// Earliest pending tick across all overlays.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlays
            .iter()
            .filter_map(|m| m.enforcer.next_deadline())
            .min()
    }

    /// Tears one overlay down.
    ///
    /// Order matters: the enforcer is stopped and unsubscribed and the
    /// identity unregistered before the window itself is dropped, so no
    /// tick or notification can reach a destroyed window.
    pub fn close(&mut self, id: usize) -> bool {
        let Some(window) = self.detach(id) else {
            return false;
        };
        drop(window);
        crate::log_info!("Overlay 0x{id:X} closed");
        true
    }

    /// Stops, unsubscribes and unregisters one overlay, handing back its
    /// still-live window.
    fn detach(&mut self, id: usize) -> Option<W> {
        let index = self.overlays.iter().position(|m| m.window.id() == id)?;
        let mut managed = self.overlays.remove(index);
        managed.enforcer.stop();
        self.registry.unregister(id);
        Some(managed.window)
    }

    /// Tears every overlay down.
    pub fn close_all(&mut self) {
        let ids: Vec<usize> = self.ids().collect();
        for id in ids {
            self.close(id);
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.overlays.iter().map(|m| m.window.id())
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    fn find(&self, id: usize) -> Option<&ManagedOverlay<W>> {
        self.overlays.iter().find(|m| m.window.id() == id)
    }

    fn find_mut(&mut self, id: usize) -> Option<&mut ManagedOverlay<W>> {
        self.overlays.iter_mut().find(|m| m.window.id() == id)
    }
}

impl<W: Overlay> Drop for OverlaySet<W> {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
