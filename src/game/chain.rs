use glam::Vec2;
use tracing::debug;

use super::error::SimError;

/// Stable handle into the segment arena.
///
/// Ids are never reused within one chain; a despawned segment keeps its slot
/// with the liveness flag cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(u32);

impl SegmentId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One positioned unit of the snake, including the head at chain index 0.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub pos: Vec2,
    pub alive: bool,
    /// Presentation-only stacking order; higher draws on top.
    pub draw_order: u32,
}

/// The snake body as an arena of segment records plus a chain order.
///
/// Body positions are fully determined by the follow algorithm; segments own
/// no velocity of their own. Chain index 0 is the head, increasing index is
/// further from it.
#[derive(Debug, Clone)]
pub struct SegmentChain {
    spacing: f32,
    slots: Vec<Segment>,
    order: Vec<SegmentId>,
}

impl SegmentChain {
    /// Create a chain holding only the head.
    pub fn new(spacing: f32, head_pos: Vec2) -> Self {
        let mut chain = Self {
            spacing,
            slots: Vec::new(),
            order: Vec::new(),
        };
        chain.insert(head_pos);
        chain
    }

    /// Track an already-positioned segment at the end of the chain.
    pub fn adopt(&mut self, pos: Vec2) -> SegmentId {
        self.insert(pos)
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> &[SegmentId] {
        &self.order
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.slots.get(id.index())
    }

    /// Position of a live segment.
    pub fn position(&self, id: SegmentId) -> Option<Vec2> {
        self.slots
            .get(id.index())
            .and_then(|s| s.alive.then_some(s.pos))
    }

    /// Position of the live head segment.
    pub fn head_pos(&self) -> Option<Vec2> {
        self.order.first().and_then(|id| self.position(*id))
    }

    /// Move the head. Ignored when the head record is missing; the caller
    /// checks `head_pos` first and reports the condition.
    pub fn set_head_pos(&mut self, pos: Vec2) {
        if let Some(id) = self.order.first().copied() {
            let slot = &mut self.slots[id.index()];
            if slot.alive {
                slot.pos = pos;
            }
        }
    }

    /// Mark a segment as gone without removing its slot.
    pub fn kill(&mut self, id: SegmentId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.alive = false;
        }
    }

    /// Live segments in chain order with their stacking order.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, u32)> + '_ {
        self.order.iter().filter_map(|id| {
            let s = &self.slots[id.index()];
            s.alive.then_some((s.pos, s.draw_order))
        })
    }

    /// Propagate positions one step down the chain.
    ///
    /// Iterates from the last-but-one index toward the head so every segment
    /// takes a position that has not been overwritten yet in this tick, then
    /// pins index 0 to the head position. Liveness is validated up front: a
    /// dead record anywhere in the chain skips the whole tick, leaving every
    /// position untouched.
    pub fn follow_tick(&mut self) -> Result<(), SimError> {
        if self.order.is_empty() {
            return Err(SimError::InvalidChainState("empty chain"));
        }
        if self
            .order
            .iter()
            .any(|id| !self.slots[id.index()].alive)
        {
            return Err(SimError::InvalidChainState("dead segment record"));
        }

        let head_pos = self.slots[self.order[0].index()].pos;
        for i in (0..self.order.len() - 1).rev() {
            let src = self.slots[self.order[i].index()].pos;
            self.slots[self.order[i + 1].index()].pos = src;
        }
        self.slots[self.order[0].index()].pos = head_pos;
        Ok(())
    }

    /// Grow the chain by one segment behind the current tail.
    ///
    /// With only the head tracked, the new segment goes behind the head along
    /// the inverse of its normalized position vector. Otherwise the tail
    /// direction comes from the last two segments; a dead record among those
    /// is revived in place first so growth cannot fail on a stale reference.
    pub fn append(&mut self) -> Result<SegmentId, SimError> {
        if self.order.is_empty() {
            return Err(SimError::InvalidChainState("empty chain"));
        }

        let new_pos = if self.order.len() == 1 {
            let head = self.slots[self.order[0].index()].pos;
            head - head.normalize_or_zero() * self.spacing
        } else {
            let last_idx = self.order.len() - 1;
            self.revive(last_idx);
            self.revive(last_idx - 1);
            let last = self.slots[self.order[last_idx].index()].pos;
            let second_last = self.slots[self.order[last_idx - 1].index()].pos;
            last + (last - second_last).normalize_or_zero() * self.spacing
        };

        let id = self.insert(new_pos);
        self.reassign_draw_order();
        Ok(id)
    }

    fn insert(&mut self, pos: Vec2) -> SegmentId {
        let id = SegmentId(self.slots.len() as u32);
        self.slots.push(Segment {
            pos,
            alive: true,
            draw_order: 0,
        });
        self.order.push(id);
        id
    }

    fn revive(&mut self, order_idx: usize) {
        let id = self.order[order_idx];
        let slot = &mut self.slots[id.index()];
        if !slot.alive {
            debug!(chain_index = order_idx, "synthesizing replacement segment");
            slot.alive = true;
        }
    }

    /// Segments closer to the head stack above segments further away. The
    /// terminal segment is left at its insertion order.
    fn reassign_draw_order(&mut self) {
        let n = self.order.len();
        for i in 0..n - 1 {
            let id = self.order[i];
            self.slots[id.index()].draw_order = (n - 1 - i) as u32;
        }
    }
}
